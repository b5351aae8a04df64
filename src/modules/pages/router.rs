use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    PUBLIC_PAGES, dashboard_page, dashboard_root, dashboard_section, public_page,
};

pub fn init_pages_router() -> Router<AppState> {
    let router = PUBLIC_PAGES
        .iter()
        .fold(Router::new(), |router, (path, _)| {
            router.route(path, get(public_page))
        });

    router
        .route("/dashboard", get(dashboard_root))
        .route("/dashboard/{role}", get(dashboard_page))
        .route("/dashboard/{role}/{section}", get(dashboard_section))
}
