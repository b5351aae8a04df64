use axum::{Json, extract::State};
use tracing::instrument;

use schoolhub_core::AppError;
use schoolhub_models::dashboard::{
    AdminDashboard, ParentDashboard, StudentDashboard, TeacherDashboard,
};

use crate::middleware::policy::{
    ReadAdminDashboard, ReadParentDashboard, ReadStudentDashboard, ReadTeacherDashboard,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::service::DashboardService;

/// School-wide counts with the ten newest students and teachers
#[utoipa::path(
    get,
    path = "/api/dashboard/admin",
    responses(
        (status = 200, description = "Admin dashboard", body = AdminDashboard),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - admins only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    _access: ReadAdminDashboard,
) -> Result<Json<AdminDashboard>, AppError> {
    let dashboard = DashboardService::admin(state.store.as_ref()).await?;
    Ok(Json(dashboard))
}

/// The caller's class, assignments, grades and last 30 attendance records
#[utoipa::path(
    get,
    path = "/api/dashboard/student",
    responses(
        (status = 200, description = "Student dashboard", body = StudentDashboard),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - students only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument]
pub async fn student_dashboard(
    State(state): State<AppState>,
    access: ReadStudentDashboard,
) -> Result<Json<StudentDashboard>, AppError> {
    let session = access.into_session()?;
    let dashboard = DashboardService::student(state.store.as_ref(), session.user_id).await?;
    Ok(Json(dashboard))
}

/// The caller's class/subject assignments and ten latest assignments
#[utoipa::path(
    get,
    path = "/api/dashboard/teacher",
    responses(
        (status = 200, description = "Teacher dashboard", body = TeacherDashboard),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - teachers only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument]
pub async fn teacher_dashboard(
    State(state): State<AppState>,
    access: ReadTeacherDashboard,
) -> Result<Json<TeacherDashboard>, AppError> {
    let session = access.into_session()?;
    let dashboard = DashboardService::teacher(state.store.as_ref(), session.user_id).await?;
    Ok(Json(dashboard))
}

/// The caller's children and their payments
#[utoipa::path(
    get,
    path = "/api/dashboard/parent",
    responses(
        (status = 200, description = "Parent dashboard", body = ParentDashboard),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - parents only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Dashboard"
)]
#[instrument]
pub async fn parent_dashboard(
    State(state): State<AppState>,
    access: ReadParentDashboard,
) -> Result<Json<ParentDashboard>, AppError> {
    let session = access.into_session()?;
    let dashboard = DashboardService::parent(state.store.as_ref(), session.user_id).await?;
    Ok(Json(dashboard))
}
