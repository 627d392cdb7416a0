use serde::{Deserialize, Serialize};

use crate::codec::{Document, DocumentCodec, DocumentReader, DocumentWriter};
use crate::errors::ModelError;
use crate::validation::{not_blank, FieldErrors};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub field: String,
    pub experience: String,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    pub fn new(name: &str, field: &str, experience: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            field: field.to_string(),
            experience: experience.to_string(),
            deadline: None,
            description: None,
        }
    }

    /// Required-field rules checked at the request boundary.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        not_blank(&mut errors, "name", &self.name, "Project name cannot be empty");
        not_blank(&mut errors, "field", &self.field, "Field cannot be empty");
        not_blank(&mut errors, "experience", &self.experience, "Experience cannot be empty");
        errors.into_result()
    }
}

impl DocumentCodec for Project {
    const COLLECTION: &'static str = "projects";
    const ID_PREFIX: &'static str = "project-";

    fn with_id(self, id: String) -> Self { Self { id: Some(id), ..self } }

    fn to_document(&self) -> Document {
        DocumentWriter::new()
            .put_opt("id", self.id.as_deref())
            .put("name", &self.name)
            .put("field", &self.field)
            .put("experience", &self.experience)
            .put_opt("deadline", self.deadline.as_deref())
            .put_opt("description", self.description.as_deref())
            .finish()
    }

    fn from_document(id: &str, doc: &Document) -> Result<Self, ModelError> {
        let r = DocumentReader::new(Self::COLLECTION, id, doc);
        Ok(Self {
            id: Some(id.to_string()),
            name: r.required("name")?,
            field: r.required("field")?,
            experience: r.required("experience")?,
            deadline: r.optional("deadline")?,
            description: r.optional("description")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_reports_each_blank_required_field() {
        let p = Project::new("", " ", "3y");
        let errs = p.validate().unwrap_err();
        assert_eq!(errs.get("name"), Some("Project name cannot be empty"));
        assert_eq!(errs.get("field"), Some("Field cannot be empty"));
        assert!(!errs.contains("experience"));
    }

    #[test]
    fn optional_fields_are_not_required() {
        assert!(Project::new("P1", "IT", "3y").validate().is_ok());
    }

    #[test]
    fn decode_takes_id_from_document_key() {
        let mut p = Project::new("P1", "IT", "3y");
        p.id = Some("stale".into());
        p.deadline = Some("2025-12-31".into());
        let doc = p.to_document();
        let back = Project::from_document("project-7", &doc).unwrap();
        assert_eq!(back.id.as_deref(), Some("project-7"));
        assert_eq!(back.deadline.as_deref(), Some("2025-12-31"));
        assert_eq!(back.description, None);
    }

    #[test]
    fn decode_rejects_document_without_name() {
        let mut doc = Project::new("P1", "IT", "3y").to_document();
        doc.remove("name");
        assert!(matches!(Project::from_document("project-1", &doc), Err(ModelError::Decode(_))));
    }

    #[test]
    fn json_body_without_optionals_deserializes() {
        let p: Project = serde_json::from_str(r#"{"name":"P1","field":"IT","experience":"3y"}"#).unwrap();
        assert_eq!(p, Project::new("P1", "IT", "3y"));
        let out = serde_json::to_value(&p).unwrap();
        assert!(out.get("id").is_none());
    }
}
