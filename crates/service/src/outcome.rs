use models::FieldErrors;
use serde::Serialize;

/// Result of a service operation that reached a decision.
///
/// Store failures are not outcomes; they travel as `Err(ServiceError)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Operation succeeded with a payload.
    Done(T),
    /// Succeeded, nothing to return.
    NoContent,
    /// Succeeded with an informational message instead of data.
    Empty(String),
    /// Target (or its parent) is absent; carries a message naming the id.
    NotFound(String),
    /// Input violated field rules; nothing was written.
    Invalid(FieldErrors),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Done(_) | Outcome::NoContent | Outcome::Empty(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(v) => Some(v),
            _ => None,
        }
    }
}

/// Confirmation message for a mutation, with the assigned id on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Ack {
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: message.into(), id: None }
    }

    pub fn created(message: impl Into<String>, id: String) -> Self {
        Self { message: message.into(), id: Some(id) }
    }
}
