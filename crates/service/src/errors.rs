use thiserror::Error;

/// Failure reported by a document store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected store response {status}: {body}")]
    Status { status: u16, body: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("invalid document id `{0}`")]
    InvalidId(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
    #[error("id sequence exhausted in `{0}`")]
    SequenceExhausted(String),
}
