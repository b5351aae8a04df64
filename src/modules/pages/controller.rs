//! Page views. The session middleware has already redirected anonymous
//! `/dashboard` requests, so these handlers only check that the role matches.

use anyhow::anyhow;
use axum::{
    Json,
    extract::Path,
    http::Uri,
    response::Redirect,
};
use tracing::{debug, instrument};

use schoolhub_core::AppError;
use schoolhub_models::dashboard::{DashboardPage, PublicPage, sidebar_for};
use schoolhub_models::roles::UserRole;

use crate::middleware::session::{CurrentSession, Session, require_session};
use crate::modules::auth::controller::ErrorResponse;

pub const PUBLIC_PAGES: [(&str, &str); 9] = [
    ("/", "Home"),
    ("/about", "About Us"),
    ("/academics", "Academics"),
    ("/admissions", "Admissions"),
    ("/gallery", "Gallery"),
    ("/contact", "Contact Us"),
    ("/login", "Login"),
    ("/register", "Register"),
    ("/forgot-password", "Forgot Password"),
];

fn page_not_found() -> AppError {
    AppError::not_found(anyhow!("Page not found"))
}

fn role_title(role: UserRole) -> &'static str {
    match role {
        UserRole::Student => "Student Dashboard",
        UserRole::Teacher => "Teacher Dashboard",
        UserRole::Parent => "Parent Dashboard",
        UserRole::Admin => "Admin Dashboard",
    }
}

/// A session may only open its own role's dashboard.
fn own_dashboard(session: Option<Session>, role: &str) -> Result<(Session, UserRole), AppError> {
    let role: UserRole = role.parse().map_err(|_| page_not_found())?;
    let session = require_session(session)?;

    if session.role != role {
        debug!(user_id = %session.user_id, requested = %role, "Dashboard role mismatch");
        return Err(AppError::forbidden("Unauthorized".to_string()));
    }

    Ok((session, role))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Public page", body = PublicPage)
    ),
    tag = "Pages"
)]
pub async fn public_page(uri: Uri) -> Result<Json<PublicPage>, AppError> {
    let path = uri.path();
    let (path, title) = PUBLIC_PAGES
        .iter()
        .find(|(page, _)| *page == path)
        .ok_or_else(page_not_found)?;

    Ok(Json(PublicPage {
        path: path.to_string(),
        title: title.to_string(),
    }))
}

/// `/dashboard` sends the caller to their own role's dashboard.
pub async fn dashboard_root(
    CurrentSession(session): CurrentSession,
) -> Result<Redirect, AppError> {
    let session = require_session(session)?;
    Ok(Redirect::to(&session.role.dashboard_path()))
}

#[utoipa::path(
    get,
    path = "/dashboard/{role}",
    params(
        ("role" = String, Path, description = "student, teacher, parent or admin")
    ),
    responses(
        (status = 200, description = "Dashboard page", body = DashboardPage),
        (status = 303, description = "Not signed in, redirected to /login"),
        (status = 403, description = "Role does not match", body = ErrorResponse),
        (status = 404, description = "Unknown role", body = ErrorResponse)
    ),
    tag = "Pages"
)]
#[instrument(skip_all)]
pub async fn dashboard_page(
    CurrentSession(session): CurrentSession,
    Path(role): Path<String>,
) -> Result<Json<DashboardPage>, AppError> {
    let (session, role) = own_dashboard(session, &role)?;

    Ok(Json(DashboardPage {
        role,
        title: role_title(role).to_string(),
        user: session.user,
        sidebar: sidebar_for(role),
    }))
}

#[utoipa::path(
    get,
    path = "/dashboard/{role}/{section}",
    params(
        ("role" = String, Path, description = "student, teacher, parent or admin"),
        ("section" = String, Path, description = "Sidebar section, e.g. results")
    ),
    responses(
        (status = 200, description = "Dashboard section page", body = DashboardPage),
        (status = 303, description = "Not signed in, redirected to /login"),
        (status = 403, description = "Role does not match", body = ErrorResponse),
        (status = 404, description = "Unknown role or section", body = ErrorResponse)
    ),
    tag = "Pages"
)]
#[instrument(skip_all)]
pub async fn dashboard_section(
    CurrentSession(session): CurrentSession,
    Path((role, section)): Path<(String, String)>,
) -> Result<Json<DashboardPage>, AppError> {
    let (session, role) = own_dashboard(session, &role)?;

    let sidebar = sidebar_for(role);
    let href = format!("{}/{}", role.dashboard_path(), section);
    let title = sidebar
        .iter()
        .find(|link| link.href == href)
        .map(|link| link.label.clone())
        .ok_or_else(page_not_found)?;

    Ok(Json(DashboardPage {
        role,
        title,
        user: session.user,
        sidebar,
    }))
}
