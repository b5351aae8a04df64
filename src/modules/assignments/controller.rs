use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::assignments::{CreateAssignmentDto, Assignment, AssignmentWithRelations};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateAssignments, ReadAssignments};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List assignments with subject, class and teacher, earliest due first
#[utoipa::path(
    get,
    path = "/api/assignments",
    responses(
        (status = 200, description = "Assignments", body = Vec<AssignmentWithRelations>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Assignments"
)]
#[instrument]
pub async fn get_assignments(
    State(state): State<AppState>,
    _access: ReadAssignments,
) -> Result<Json<Vec<AssignmentWithRelations>>, AppError> {
    let rows = state.store.list_assignments().await?;
    Ok(Json(rows))
}

/// Create an assignment
#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Assignment>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers and admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Assignments"
)]
#[instrument]
pub async fn create_assignment(
    State(state): State<AppState>,
    _access: CreateAssignments,
    JsonBody(dto): JsonBody<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<Vec<Assignment>>), AppError> {
    let created = state.store.create_assignment(dto).await?;
    track_record_created("assignments");
    Ok((StatusCode::CREATED, Json(created)))
}
