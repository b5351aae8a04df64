use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_attendance, get_attendance};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new().route("/", get(get_attendance).post(create_attendance))
}
