use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_teacher, get_teachers};

pub fn init_teachers_router() -> Router<AppState> {
    Router::new().route("/", get(get_teachers).post(create_teacher))
}
