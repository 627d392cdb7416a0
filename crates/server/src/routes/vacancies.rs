use axum::{extract::{Path, State}, response::Response};
use models::Vacancy;
use service::{Ack, Outcome};
use tracing::info;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;
use crate::responses::render;
use crate::routes::AppState;

#[utoipa::path(
    get, path = "/projects/{id}/vacancies", tag = "vacancies",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Vacancies of the project, or a message when there are none", body = [crate::openapi::VacancyDoc]),
        (status = 404, description = "Project Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>, Path(project_id): Path<String>) -> Result<Response, JsonApiError> {
    Ok(render(state.services.vacancies.list_by_project(&project_id).await?))
}

/// Field rules are checked by the service, after the project lookup.
#[utoipa::path(
    post, path = "/projects/{id}/vacancies", tag = "vacancies",
    params(("id" = String, Path, description = "Project ID")),
    request_body = crate::openapi::VacancyDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AckDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Project Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    JsonBody(vacancy): JsonBody<Vacancy>,
) -> Result<Response, JsonApiError> {
    info!(%project_id, name = %vacancy.name, "vacancy_create_request");
    Ok(render(state.services.vacancies.create(&project_id, vacancy).await?))
}

#[utoipa::path(
    put, path = "/vacancies/{id}", tag = "vacancies",
    params(("id" = String, Path, description = "Vacancy ID")),
    request_body = crate::openapi::VacancyDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AckDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(vacancy): JsonBody<Vacancy>,
) -> Result<Response, JsonApiError> {
    if let Err(errors) = vacancy.validate() {
        return Ok(render(Outcome::<Ack>::Invalid(errors)));
    }
    Ok(render(state.services.vacancies.update(&id, vacancy).await?))
}

#[utoipa::path(
    delete, path = "/vacancies/{id}", tag = "vacancies",
    params(("id" = String, Path, description = "Vacancy ID")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::AckDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, JsonApiError> {
    Ok(render(state.services.vacancies.delete(&id).await?))
}
