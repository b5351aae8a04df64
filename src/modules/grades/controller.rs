use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::grades::{CreateGradeDto, Grade, GradeWithRelations};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateGrades, ReadGrades};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

use super::service::GradeService;

/// List grades with student, subject and teacher, newest first
#[utoipa::path(
    get,
    path = "/api/grades",
    responses(
        (status = 200, description = "Grades", body = Vec<GradeWithRelations>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument]
pub async fn get_grades(
    State(state): State<AppState>,
    _access: ReadGrades,
) -> Result<Json<Vec<GradeWithRelations>>, AppError> {
    let grades = state.store.list_grades().await?;
    Ok(Json(grades))
}

/// Record a grade. A missing letter is derived from `score`:
/// A 90-100, B 80-89, C 70-79, D 60-69, E 50-59, F below 50.
#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Grade>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers and admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Grades"
)]
#[instrument]
pub async fn create_grade(
    State(state): State<AppState>,
    _access: CreateGrades,
    JsonBody(dto): JsonBody<CreateGradeDto>,
) -> Result<(StatusCode, Json<Vec<Grade>>), AppError> {
    let created = GradeService::create_grade(state.store.as_ref(), dto).await?;
    track_record_created("grades");
    Ok((StatusCode::CREATED, Json(created)))
}
