use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{admin_dashboard, parent_dashboard, student_dashboard, teacher_dashboard};

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_dashboard))
        .route("/student", get(student_dashboard))
        .route("/teacher", get(teacher_dashboard))
        .route("/parent", get(parent_dashboard))
}
