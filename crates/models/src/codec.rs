//! Explicit record <-> document mapping.
//!
//! Documents are flat JSON objects. Each entity writes and reads its own
//! fields by name; the document key is authoritative for `id` on decode.

use serde_json::{Map, Value};

use crate::errors::ModelError;

pub type Document = Map<String, Value>;

/// Typed codec between an entity and its stored document.
pub trait DocumentCodec: Sized + Clone + Send + Sync + 'static {
    /// Collection the entity lives in.
    const COLLECTION: &'static str;
    /// Prefix of sequence ids, e.g. `project-`.
    const ID_PREFIX: &'static str;

    fn with_id(self, id: String) -> Self;

    fn to_document(&self) -> Document;

    fn from_document(id: &str, doc: &Document) -> Result<Self, ModelError>;
}

/// Builder for flat string documents.
#[derive(Default)]
pub struct DocumentWriter {
    doc: Document,
}

impl DocumentWriter {
    pub fn new() -> Self { Self::default() }

    pub fn put(mut self, field: &str, value: &str) -> Self {
        self.doc.insert(field.to_string(), Value::String(value.to_string()));
        self
    }

    /// `None` is written as an explicit null so a full overwrite clears the field.
    pub fn put_opt(mut self, field: &str, value: Option<&str>) -> Self {
        let v = value.map(|s| Value::String(s.to_string())).unwrap_or(Value::Null);
        self.doc.insert(field.to_string(), v);
        self
    }

    pub fn finish(self) -> Document { self.doc }
}

/// Field accessor that reports which document a decode failure came from.
pub struct DocumentReader<'a> {
    collection: &'a str,
    id: &'a str,
    doc: &'a Document,
}

impl<'a> DocumentReader<'a> {
    pub fn new(collection: &'a str, id: &'a str, doc: &'a Document) -> Self {
        Self { collection, id, doc }
    }

    pub fn required(&self, field: &str) -> Result<String, ModelError> {
        match self.doc.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Null) | None => Err(ModelError::missing_field(self.collection, self.id, field)),
            Some(other) => Err(ModelError::Decode(format!(
                "{}/{}: field `{}` is not a string: {}",
                self.collection, self.id, field, other
            ))),
        }
    }

    pub fn optional(&self, field: &str) -> Result<Option<String>, ModelError> {
        match self.doc.get(field) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Null) | None => Ok(None),
            Some(other) => Err(ModelError::Decode(format!(
                "{}/{}: field `{}` is not a string: {}",
                self.collection, self.id, field, other
            ))),
        }
    }
}
