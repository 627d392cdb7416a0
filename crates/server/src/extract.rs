use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::JsonApiError;

/// `Json<T>` whose rejections become 400 JSON error bodies.
///
/// A missing field is reported by name; every other parse failure gets a
/// generic message.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_error(&rejection)),
        }
    }
}

fn rejection_error(rejection: &JsonRejection) -> JsonApiError {
    let text = rejection.body_text();
    debug!(%text, "json body rejected");
    match missing_field(&text) {
        Some(field) => JsonApiError::bad_request(format!("Missing required field: {field}")),
        None => JsonApiError::bad_request("Invalid JSON format or missing required fields"),
    }
}

/// Field name from serde's "missing field `x`" message.
fn missing_field(text: &str) -> Option<&str> {
    let start = text.find("missing field `")? + "missing field `".len();
    let rest = &text[start..];
    let end = rest.find('`')?;
    Some(&rest[..end])
}
