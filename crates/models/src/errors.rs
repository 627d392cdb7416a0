use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("decode error: {0}")]
    Decode(String),
}

impl ModelError {
    pub fn missing_field(collection: &str, id: &str, field: &str) -> Self {
        Self::Decode(format!("{collection}/{id}: missing string field `{field}`"))
    }
}
