use tracing::{info, instrument, warn};

use schoolhub_auth::{SessionTokens, issue_session_tokens};
use schoolhub_config::JwtConfig;
use schoolhub_core::{AppError, hash_password, verify_dummy_password, verify_password};
use schoolhub_db::IdentityProvider;
use schoolhub_models::auth::{
    LoginRequest, LoginResponse, RegisterRequest, SessionUser, SignUp, UserMetadata,
};
use schoolhub_models::roles::UserRole;

use crate::metrics::{
    track_jwt_issued, track_user_created, track_user_login_failure, track_user_login_success,
};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Emails are stored and looked up lowercased.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService;

impl AuthService {
    /// Creates the account and its profile row.
    ///
    /// Every provider failure, including an already registered email, is a 400.
    #[instrument(skip(identity, dto), fields(email = %dto.email, role = %dto.role))]
    pub async fn register(
        identity: &dyn IdentityProvider,
        dto: RegisterRequest,
    ) -> Result<SessionUser, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let user = identity
            .sign_up(SignUp {
                email: normalize_email(&dto.email),
                password_hash,
                metadata: UserMetadata {
                    first_name: dto.first_name,
                    last_name: dto.last_name,
                    role: Some(dto.role.as_str().to_string()),
                },
                role: dto.role,
            })
            .await
            .map_err(|e| AppError::bad_request(e.error))?;

        let session_user = SessionUser::resolve(&user, None);
        info!(user_id = %user.id, "User registered");
        track_user_created(session_user.role.as_str());

        Ok(session_user)
    }

    /// Checks credentials and issues a token pair.
    ///
    /// The role in the response comes from the profile, then the sign-up
    /// metadata, then defaults to student.
    #[instrument(skip(identity, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login(
        identity: &dyn IdentityProvider,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<(LoginResponse, SessionTokens), AppError> {
        let email = normalize_email(&dto.email);
        let Some(user) = identity.find_user_by_email(&email).await? else {
            verify_dummy_password(&dto.password);
            warn!("Login attempt for unknown email");
            track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            track_user_login_failure("wrong_password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let profile = identity.get_profile(user.id).await?;
        let session_user = SessionUser::resolve(&user, profile.as_ref());
        let role = session_user.role;

        let tokens = issue_session_tokens(
            user.id,
            &user.email,
            user.user_metadata.role.as_deref(),
            jwt_config,
        )?;
        track_jwt_issued();
        track_user_login_success(role.as_str());

        let response = LoginResponse {
            message: "Login successful".to_string(),
            user: session_user,
            role,
            redirect_to: role.dashboard_path(),
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        };

        Ok((response, tokens))
    }

    /// `{base}/dashboard/{role}`, the link sent in the welcome email.
    pub fn dashboard_link(base: &str, role: UserRole) -> String {
        format!("{}{}", base.trim_end_matches('/'), role.dashboard_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_db::MemoryProvider;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    fn register_request(email: &str, role: UserRole) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: "secret123".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Obi".to_string()),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let provider = MemoryProvider::new();
        let user = AuthService::register(&provider, register_request("t@example.com", UserRole::Teacher))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Teacher);

        let (response, tokens) = AuthService::login(
            &provider,
            &jwt(),
            LoginRequest {
                email: "t@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(response.role, UserRole::Teacher);
        assert_eq!(response.redirect_to, "/dashboard/teacher");
        assert_eq!(response.access_token, tokens.access_token);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_bad_request() {
        let provider = MemoryProvider::new();
        AuthService::register(&provider, register_request("dup@example.com", UserRole::Student))
            .await
            .unwrap();
        let err = AuthService::register(&provider, register_request("dup@example.com", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let provider = MemoryProvider::new();
        AuthService::register(&provider, register_request("p@example.com", UserRole::Parent))
            .await
            .unwrap();

        let err = AuthService::login(
            &provider,
            &jwt(),
            LoginRequest {
                email: "p@example.com".to_string(),
                password: "nope".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_email_is_case_insensitive() {
        let provider = MemoryProvider::new();
        let user = AuthService::register(&provider, register_request("Ada.Obi@Example.com", UserRole::Student))
            .await
            .unwrap();
        assert_eq!(user.email, "ada.obi@example.com");

        let (response, _) = AuthService::login(
            &provider,
            &jwt(),
            LoginRequest {
                email: "ADA.OBI@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(response.user.id, user.id);

        let err = AuthService::register(&provider, register_request("ada.obi@EXAMPLE.com", UserRole::Student))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn test_unknown_email_matches_wrong_password_error() {
        let provider = MemoryProvider::new();

        let err = AuthService::login(
            &provider,
            &jwt(),
            LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "secret123".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_dashboard_link() {
        assert_eq!(
            AuthService::dashboard_link("https://school.example/", UserRole::Parent),
            "https://school.example/dashboard/parent"
        );
    }
}
