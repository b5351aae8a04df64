use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_grade, get_grades};

pub fn init_grades_router() -> Router<AppState> {
    Router::new().route("/", get(get_grades).post(create_grade))
}
