//! Session middleware and the extractor handlers use to read its result.
//!
//! On every request the middleware:
//!
//! 1. reads the access token from `Authorization: Bearer`, falling back to the
//!    access cookie;
//! 2. if that token verifies, loads the user and profile;
//! 3. otherwise, if the refresh cookie verifies, loads the user and issues a
//!    fresh token pair, written back as `Set-Cookie` on the response;
//! 4. resolves the role (profile, then sign-up metadata, then student) and
//!    stores a [`Session`] in the request extensions;
//! 5. redirects unauthenticated `/dashboard` requests to the login page, and
//!    authenticated `/login` or `/register` requests to the role dashboard.
//!
//! Provider failures are logged and treated as "no session".

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};
use uuid::Uuid;

use schoolhub_auth::{SessionTokens, issue_session_tokens, verify_refresh_token, verify_token};
use schoolhub_core::AppError;
use schoolhub_models::auth::SessionUser;
use schoolhub_models::roles::UserRole;

use crate::metrics::track_session_refresh;
use crate::state::AppState;
use crate::utils::cookies::{session_cookies, with_cookies};

const PROTECTED_PREFIX: &str = "/dashboard";

/// The authenticated caller for this request.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub user: SessionUser,
}

impl From<SessionUser> for Session {
    fn from(user: SessionUser) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            user,
        }
    }
}

/// The session attached by [`session_middleware`], if any.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentSession(parts.extensions.get::<Session>().cloned()))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn is_protected(path: &str) -> bool {
    path == PROTECTED_PREFIX || path.starts_with("/dashboard/")
}

async fn load_session(state: &AppState, user_id: Uuid) -> Result<Option<SessionUser>, AppError> {
    let Some(user) = state.identity.get_user(user_id).await? else {
        return Ok(None);
    };
    let profile = state.identity.get_profile(user_id).await?;

    Ok(Some(SessionUser::resolve(&user, profile.as_ref())))
}

/// Resolves the caller, refreshing the token pair when only the refresh cookie is valid.
async fn resolve_session(
    state: &AppState,
    access_token: Option<String>,
    refresh_token: Option<String>,
) -> Result<(Option<SessionUser>, Option<SessionTokens>), AppError> {
    if let Some(claims) = access_token
        .as_deref()
        .and_then(|token| verify_token(token, &state.jwt_config).ok())
    {
        if let Ok(user_id) = Uuid::parse_str(&claims.sub) {
            return Ok((load_session(state, user_id).await?, None));
        }
    }

    let Some(claims) = refresh_token
        .as_deref()
        .and_then(|token| verify_refresh_token(token, &state.jwt_config).ok())
    else {
        return Ok((None, None));
    };
    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        return Ok((None, None));
    };

    let Some(user) = state.identity.get_user(user_id).await? else {
        return Ok((None, None));
    };
    let profile = state.identity.get_profile(user_id).await?;

    let tokens = issue_session_tokens(
        user.id,
        &user.email,
        user.user_metadata.role.as_deref(),
        &state.jwt_config,
    )?;
    debug!(user_id = %user.id, "Session refreshed");
    track_session_refresh();

    Ok((Some(SessionUser::resolve(&user, profile.as_ref())), Some(tokens)))
}

/// Login page URL that returns the caller to `path` after signing in.
fn login_redirect(path: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirectTo", path)
        .finish();
    format!("/login?{}", query)
}

pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let access_token = bearer_token(req.headers()).or_else(|| {
        jar.get(&state.session_config.access_cookie_name)
            .map(|c| c.value().to_string())
    });
    let refresh_token = jar
        .get(&state.session_config.refresh_cookie_name)
        .map(|c| c.value().to_string());

    let (session, refreshed) = match resolve_session(&state, access_token, refresh_token).await {
        Ok(resolved) => resolved,
        Err(e) => {
            warn!(error = %e.message(), "Session lookup failed, continuing unauthenticated");
            (None, None)
        }
    };

    let refreshed = refreshed.map(|tokens| {
        with_cookies(
            CookieJar::new(),
            session_cookies(&tokens, &state.session_config, &state.jwt_config),
        )
    });

    let path = req.uri().path().to_string();

    let response = match session {
        None if is_protected(&path) => {
            debug!(path = %path, "Unauthenticated dashboard access, redirecting to login");
            Redirect::to(&login_redirect(&path)).into_response()
        }
        Some(user) if path == "/login" || path == "/register" => {
            Redirect::to(&user.role.dashboard_path()).into_response()
        }
        session => {
            if let Some(user) = session {
                req.extensions_mut().insert(Session::from(user));
            }
            next.run(req).await
        }
    };

    match refreshed {
        Some(jar) => (jar, response).into_response(),
        None => response,
    }
}

/// Rejects the request with 401 unless a session is present.
pub fn require_session(session: Option<Session>) -> Result<Session, AppError> {
    session.ok_or_else(|| AppError::unauthorized("Unauthorized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/dashboard"));
        assert!(is_protected("/dashboard/admin"));
        assert!(is_protected("/dashboard/student/results"));
        assert!(!is_protected("/dashboards"));
        assert!(!is_protected("/api/dashboard/admin"));
        assert!(!is_protected("/login"));
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn test_login_redirect_encodes_path() {
        assert_eq!(
            login_redirect("/dashboard/teacher"),
            "/login?redirectTo=%2Fdashboard%2Fteacher"
        );
        assert_eq!(
            login_redirect("/dashboard/a&next=https://evil.example"),
            "/login?redirectTo=%2Fdashboard%2Fa%26next%3Dhttps%3A%2F%2Fevil.example"
        );
    }

    #[test]
    fn test_redirect_is_see_other() {
        let response = Redirect::to("/login").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
}
