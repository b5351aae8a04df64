use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::students::{CreateStudentDto, Student, StudentWithRelations};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateStudents, ReadStudents};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List students with their profile and class, newest first
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students", body = Vec<StudentWithRelations>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins and teachers only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn get_students(
    State(state): State<AppState>,
    _access: ReadStudents,
) -> Result<Json<Vec<StudentWithRelations>>, AppError> {
    let rows = state.store.list_students().await?;
    Ok(Json(rows))
}

/// Create a student record
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Student>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument]
pub async fn create_student(
    State(state): State<AppState>,
    _access: CreateStudents,
    JsonBody(dto): JsonBody<CreateStudentDto>,
) -> Result<(StatusCode, Json<Vec<Student>>), AppError> {
    let created = state.store.create_student(dto).await?;
    track_record_created("students");
    Ok((StatusCode::CREATED, Json(created)))
}
