use axum::{extract::{Path, State}, response::Response};
use models::Project;
use service::{Ack, Outcome};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::responses::render;
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/projects", tag = "projects",
    responses(
        (status = 200, description = "All projects", body = [crate::openapi::ProjectDoc]),
        (status = 204, description = "No projects"),
        (status = 500, description = "Store Failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Response, JsonApiError> {
    let out = state.services.projects.list_all().await?;
    if let Outcome::Done(list) = &out {
        info!(count = list.len(), "list projects");
    }
    Ok(render(out))
}

#[utoipa::path(
    get, path = "/projects/{id}", tag = "projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProjectDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, JsonApiError> {
    Ok(render(state.services.projects.get_by_id(&id).await?))
}

#[utoipa::path(
    post, path = "/projects", tag = "projects",
    request_body = crate::openapi::ProjectDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AckDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(State(state): State<AppState>, JsonBody(project): JsonBody<Project>) -> Result<Response, JsonApiError> {
    info!(name = %project.name, field = %project.field, "project_create_request");
    if let Err(errors) = project.validate() {
        return Ok(render(Outcome::<Ack>::Invalid(errors)));
    }
    Ok(render(state.services.projects.create(project).await?))
}

#[utoipa::path(
    put, path = "/projects/{id}", tag = "projects",
    params(("id" = String, Path, description = "Project ID")),
    request_body = crate::openapi::ProjectDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(project): JsonBody<Project>,
) -> Result<Response, JsonApiError> {
    if let Err(errors) = project.validate() {
        return Ok(render(Outcome::<Ack>::Invalid(errors)));
    }
    Ok(render(state.services.projects.update(&id, project).await?))
}

#[utoipa::path(
    delete, path = "/projects/{id}", tag = "projects",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, JsonApiError> {
    Ok(render(state.services.projects.delete(&id).await?))
}
