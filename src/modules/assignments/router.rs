use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_assignment, get_assignments};

pub fn init_assignments_router() -> Router<AppState> {
    Router::new().route("/", get(get_assignments).post(create_assignment))
}
