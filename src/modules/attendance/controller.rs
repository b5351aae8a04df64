use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::attendance::{CreateAttendanceDto, Attendance, AttendanceWithRelations};

use crate::metrics::track_record_created;
use crate::middleware::policy::{CreateAttendance, ReadAttendance};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

/// List attendance records, most recent date first
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses(
        (status = 200, description = "Attendance", body = Vec<AttendanceWithRelations>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument]
pub async fn get_attendance(
    State(state): State<AppState>,
    _access: ReadAttendance,
) -> Result<Json<Vec<AttendanceWithRelations>>, AppError> {
    let rows = state.store.list_attendance().await?;
    Ok(Json(rows))
}

/// Record attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Created row", body = Vec<Attendance>),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers and admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument]
pub async fn create_attendance(
    State(state): State<AppState>,
    _access: CreateAttendance,
    JsonBody(dto): JsonBody<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<Vec<Attendance>>), AppError> {
    let created = state.store.create_attendance(dto).await?;
    track_record_created("attendance");
    Ok((StatusCode::CREATED, Json(created)))
}
