use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::classes::{CreateClassDto, Class, ClassWithTeacher};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateClasses, ReadClasses};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List classes with their class teacher, by name
#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Classes", body = Vec<ClassWithTeacher>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument]
pub async fn get_classes(
    State(state): State<AppState>,
    _access: ReadClasses,
) -> Result<Json<Vec<ClassWithTeacher>>, AppError> {
    let rows = state.store.list_classes().await?;
    Ok(Json(rows))
}

/// Create a class
#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Class>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Classes"
)]
#[instrument]
pub async fn create_class(
    State(state): State<AppState>,
    _access: CreateClasses,
    JsonBody(dto): JsonBody<CreateClassDto>,
) -> Result<(StatusCode, Json<Vec<Class>>), AppError> {
    let created = state.store.create_class(dto).await?;
    track_record_created("classes");
    Ok((StatusCode::CREATED, Json(created)))
}
