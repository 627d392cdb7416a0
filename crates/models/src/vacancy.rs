use serde::{Deserialize, Serialize};

use crate::codec::{Document, DocumentCodec, DocumentReader, DocumentWriter};
use crate::errors::ModelError;
use crate::validation::{is_blank, max_chars, not_blank, FieldErrors};

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Field holding the owning project id in stored documents.
pub const PROJECT_ID_FIELD: &str = "projectId";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub field: String,
    pub experience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub deadline: String,
    pub description: String,
    /// Assigned by the server on creation; ignored on update.
    #[serde(rename = "projectId", default)]
    pub project_id: Option<String>,
}

impl Vacancy {
    pub fn new(name: &str, field: &str, experience: &str, deadline: &str, description: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            field: field.to_string(),
            experience: experience.to_string(),
            country: None,
            deadline: deadline.to_string(),
            description: description.to_string(),
            project_id: None,
        }
    }

    pub fn with_project_id(self, project_id: Option<String>) -> Self {
        Self { project_id, ..self }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        not_blank(&mut errors, "name", &self.name, "Vacancy name cannot be empty");
        max_chars(&mut errors, "name", &self.name, NAME_MAX_CHARS, "Vacancy name must not exceed 100 characters");
        not_blank(&mut errors, "field", &self.field, "Field cannot be empty");
        not_blank(&mut errors, "experience", &self.experience, "Experience cannot be empty");
        if let Some(country) = &self.country {
            if is_blank(country) {
                errors.add("country", "Country cannot be blank");
            }
        }
        not_blank(&mut errors, "deadline", &self.deadline, "Deadline cannot be empty");
        not_blank(&mut errors, "description", &self.description, "Description cannot be empty");
        max_chars(
            &mut errors,
            "description",
            &self.description,
            DESCRIPTION_MAX_CHARS,
            "Description must not exceed 1000 characters",
        );
        errors.into_result()
    }
}

impl DocumentCodec for Vacancy {
    const COLLECTION: &'static str = "vacancies";
    const ID_PREFIX: &'static str = "vacancy-";

    fn with_id(self, id: String) -> Self { Self { id: Some(id), ..self } }

    fn to_document(&self) -> Document {
        DocumentWriter::new()
            .put_opt("id", self.id.as_deref())
            .put("name", &self.name)
            .put("field", &self.field)
            .put("experience", &self.experience)
            .put_opt("country", self.country.as_deref())
            .put("deadline", &self.deadline)
            .put("description", &self.description)
            .put_opt(PROJECT_ID_FIELD, self.project_id.as_deref())
            .finish()
    }

    fn from_document(id: &str, doc: &Document) -> Result<Self, ModelError> {
        let r = DocumentReader::new(Self::COLLECTION, id, doc);
        Ok(Self {
            id: Some(id.to_string()),
            name: r.required("name")?,
            field: r.required("field")?,
            experience: r.required("experience")?,
            country: r.optional("country")?,
            deadline: r.required("deadline")?,
            description: r.required("description")?,
            project_id: r.optional(PROJECT_ID_FIELD)?,
        })
    }
}
