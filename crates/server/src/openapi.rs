use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub details: Option<String> }

#[derive(ToSchema)]
pub struct AckDoc {
    pub message: String,
    /// Present on create.
    pub id: Option<String>,
}

#[derive(ToSchema)]
pub struct ProjectDoc {
    pub id: Option<String>,
    pub name: String,
    pub field: String,
    pub experience: String,
    pub deadline: Option<String>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct VacancyDoc {
    pub id: Option<String>,
    /// At most 100 characters.
    pub name: String,
    pub field: String,
    pub experience: String,
    pub country: Option<String>,
    pub deadline: String,
    /// At most 1000 characters.
    pub description: String,
    /// Set by the server; ignored in requests.
    #[allow(non_snake_case)]
    pub projectId: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::projects::list,
        crate::routes::projects::get,
        crate::routes::projects::create,
        crate::routes::projects::update,
        crate::routes::projects::delete,
        crate::routes::vacancies::list,
        crate::routes::vacancies::create,
        crate::routes::vacancies::update,
        crate::routes::vacancies::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            AckDoc,
            ProjectDoc,
            VacancyDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "projects"),
        (name = "vacancies")
    )
)]
pub struct ApiDoc;
