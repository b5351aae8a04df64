use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::teachers::{CreateTeacherDto, Teacher, TeacherWithContact};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateTeachers, ReadTeachers};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List teachers with their profile, newest first
#[utoipa::path(
    get,
    path = "/api/teachers",
    responses(
        (status = 200, description = "Teachers", body = Vec<TeacherWithContact>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument]
pub async fn get_teachers(
    State(state): State<AppState>,
    _access: ReadTeachers,
) -> Result<Json<Vec<TeacherWithContact>>, AppError> {
    let rows = state.store.list_teachers().await?;
    Ok(Json(rows))
}

/// Create a teacher record
#[utoipa::path(
    post,
    path = "/api/teachers",
    request_body = CreateTeacherDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Teacher>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Teachers"
)]
#[instrument]
pub async fn create_teacher(
    State(state): State<AppState>,
    _access: CreateTeachers,
    JsonBody(dto): JsonBody<CreateTeacherDto>,
) -> Result<(StatusCode, Json<Vec<Teacher>>), AppError> {
    let created = state.store.create_teacher(dto).await?;
    track_record_created("teachers");
    Ok((StatusCode::CREATED, Json(created)))
}
