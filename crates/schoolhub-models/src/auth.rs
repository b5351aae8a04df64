//! Authentication DTOs and the identity record owned by the provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::profiles::Profile;
use crate::roles::UserRole;

/// Free-form data written at sign-up and kept on the identity record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserMetadata {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

impl UserMetadata {
    /// The metadata role, if it names a known role.
    pub fn parsed_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }
}

/// Identity record. Credentials live here; names and role live on [`Profile`].
#[derive(Debug, Clone, FromRow)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub user_metadata: Json<UserMetadata>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// A new account, password already hashed.
#[derive(Debug, Clone)]
pub struct SignUp {
    pub email: String,
    pub password_hash: String,
    pub metadata: UserMetadata,
    pub role: UserRole,
}

/// The caller as seen by the auth context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub avatar_url: Option<String>,
}

impl SessionUser {
    /// Builds the caller from the identity record, preferring profile data.
    pub fn resolve(user: &AuthUser, profile: Option<&Profile>) -> Self {
        let metadata = &user.user_metadata.0;
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: profile
                .and_then(|p| p.first_name.clone())
                .or_else(|| metadata.first_name.clone()),
            last_name: profile
                .and_then(|p| p.last_name.clone())
                .or_else(|| metadata.last_name.clone()),
            role: resolve_role(profile.and_then(|p| p.role), metadata.parsed_role()),
            avatar_url: profile.and_then(|p| p.avatar_url.clone()),
        }
    }
}

/// Profile role, then sign-up metadata role, then [`UserRole::Student`].
pub fn resolve_role(profile_role: Option<UserRole>, metadata_role: Option<UserRole>) -> UserRole {
    profile_role.or(metadata_role).unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: SessionUser,
    pub role: UserRole,
    pub redirect_to: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: SessionUser,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub message: String,
    pub redirect_to: String,
}

/// Snapshot of the auth context for the current request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
    pub role: Option<UserRole>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_user(metadata_role: Option<&str>) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: "u@example.com".to_string(),
            password_hash: "x".to_string(),
            user_metadata: Json(UserMetadata {
                first_name: Some("Meta".to_string()),
                last_name: None,
                role: metadata_role.map(str::to_string),
            }),
            created_at: Utc::now(),
        }
    }

    fn profile(id: Uuid, role: Option<UserRole>) -> Profile {
        Profile {
            id,
            email: "u@example.com".to_string(),
            first_name: Some("Prof".to_string()),
            last_name: Some("Ile".to_string()),
            role,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_fallback_order() {
        assert_eq!(
            resolve_role(Some(UserRole::Admin), Some(UserRole::Teacher)),
            UserRole::Admin
        );
        assert_eq!(resolve_role(None, Some(UserRole::Teacher)), UserRole::Teacher);
        assert_eq!(resolve_role(None, None), UserRole::Student);
    }

    #[test]
    fn test_resolve_prefers_profile() {
        let user = auth_user(Some("parent"));
        let p = profile(user.id, Some(UserRole::Teacher));

        let resolved = SessionUser::resolve(&user, Some(&p));
        assert_eq!(resolved.role, UserRole::Teacher);
        assert_eq!(resolved.first_name.as_deref(), Some("Prof"));
    }

    #[test]
    fn test_resolve_without_profile_uses_metadata() {
        let user = auth_user(Some("parent"));
        let resolved = SessionUser::resolve(&user, None);
        assert_eq!(resolved.role, UserRole::Parent);
        assert_eq!(resolved.first_name.as_deref(), Some("Meta"));

        let unknown = auth_user(Some("janitor"));
        assert_eq!(SessionUser::resolve(&unknown, None).role, UserRole::Student);
    }

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"email":"a@b.com","password":"secret1","firstName":"A","lastName":"B","role":"teacher"}"#,
        )
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("A"));
        assert_eq!(req.role, UserRole::Teacher);
    }
}
