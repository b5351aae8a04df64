use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use schoolhub_config::CorsConfig;
use schoolhub_core::AppError;
use schoolhub_models::auth::{
    LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse,
    SessionResponse,
};

use crate::middleware::session::CurrentSession;
use crate::state::AppState;
use crate::utils::cookies::{cleared_cookies, session_cookies, with_cookies};
use crate::utils::email::EmailService;
use crate::validator::ValidatedJson;

use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Where links in outgoing email should point: the configured base URL, else
/// the request `Origin` when it is one of the allowed CORS origins.
fn link_origin(base: Option<&str>, cors: &CorsConfig, headers: &HeaderMap) -> Option<String> {
    if let Some(base) = base {
        return Some(base.to_string());
    }

    header_str(headers, header::ORIGIN)
        .filter(|origin| cors.allows(origin))
        .map(str::to_string)
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, headers, dto))]
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let user = AuthService::register(state.identity.as_ref(), dto).await?;

    let base = state.session_config.redirect_base_url.as_deref();
    if let Some(origin) = link_origin(base, &state.cors_config, &headers) {
        let link = AuthService::dashboard_link(&origin, user.role);
        let name = user.first_name.as_deref().unwrap_or(&user.email);
        let email = EmailService::new(state.email_config.clone());
        if let Err(e) = email
            .send_welcome_email(&user.email, name, user.role, &link)
            .await
        {
            warn!(user_id = %user.id, error = %e.message(), "Failed to send welcome email");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful. Please check your email.".to_string(),
            user,
        }),
    ))
}

/// Log in and receive session cookies
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar, dto))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let (response, tokens) =
        AuthService::login(state.identity.as_ref(), &state.jwt_config, dto).await?;
    let cookies = session_cookies(&tokens, &state.session_config, &state.jwt_config);

    Ok((with_cookies(jar, cookies), Json(response)))
}

/// Clear the session cookies
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, jar))]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = with_cookies(jar, cleared_cookies(&state.session_config));

    (
        jar,
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
            redirect_to: "/".to_string(),
        }),
    )
}

/// Current caller, as resolved by the session middleware
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Auth context snapshot", body = SessionResponse)
    ),
    tag = "Authentication"
)]
pub async fn session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    let user = session.map(|s| s.user);

    Json(SessionResponse {
        role: user.as_ref().map(|u| u.role),
        is_authenticated: user.is_some(),
        is_loading: false,
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn cors() -> CorsConfig {
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }

    fn origin(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static(value));
        headers.insert(header::HOST, HeaderValue::from_static("attacker.example"));
        headers
    }

    #[test]
    fn test_configured_base_url_wins() {
        let link = link_origin(
            Some("https://school.example"),
            &cors(),
            &origin("http://localhost:3000"),
        );
        assert_eq!(link.as_deref(), Some("https://school.example"));
    }

    #[test]
    fn test_allowed_origin_is_used() {
        let link = link_origin(None, &cors(), &origin("http://localhost:3000"));
        assert_eq!(link.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_untrusted_origin_and_host_are_ignored() {
        assert_eq!(link_origin(None, &cors(), &origin("https://evil.example")), None);

        let mut host_only = HeaderMap::new();
        host_only.insert(header::HOST, HeaderValue::from_static("evil.example"));
        assert_eq!(link_origin(None, &cors(), &host_only), None);
    }
}
