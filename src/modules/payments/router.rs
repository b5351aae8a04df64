use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_payment, get_payments};

pub fn init_payments_router() -> Router<AppState> {
    Router::new().route("/", get(get_payments).post(create_payment))
}
