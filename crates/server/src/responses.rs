use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::Outcome;

use crate::errors::JsonApiError;

/// HTTP rendering of a service outcome.
pub fn render<T: Serialize>(outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::Done(body) => (StatusCode::OK, Json(body)).into_response(),
        Outcome::NoContent => StatusCode::NO_CONTENT.into_response(),
        Outcome::Empty(message) => (StatusCode::OK, Json(serde_json::json!({"message": message}))).into_response(),
        Outcome::NotFound(message) => JsonApiError::not_found(message).into_response(),
        Outcome::Invalid(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
    }
}
