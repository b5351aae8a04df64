//! Token creation and verification.
//!
//! Both token kinds are HS256 JWTs signed with [`JwtConfig::secret`]. Access
//! tokens live for `access_token_expiry` seconds and refresh tokens for
//! `refresh_token_expiry` seconds.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use schoolhub_config::JwtConfig;
use schoolhub_core::AppError;

use crate::claims::{Claims, RefreshTokenClaims, SessionTokens};

fn expiry_from_now(now: i64, lifetime: i64) -> usize {
    (now + lifetime).max(0) as usize
}

/// Creates an access token for `user_id`.
///
/// `metadata_role` is the role written into the user's sign-up metadata, if any.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    metadata_role: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        metadata_role: metadata_role.map(str::to_string),
        exp: expiry_from_now(now, jwt_config.access_token_expiry),
        iat: now as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Unauthorized when the signature is wrong, the token has expired, or the
/// token is not an access token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))
}

pub fn create_refresh_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = RefreshTokenClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: expiry_from_now(now, jwt_config.refresh_token_expiry),
        iat: now as usize,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create refresh token: {}", e)))
}

pub fn verify_refresh_token(
    token: &str,
    jwt_config: &JwtConfig,
) -> Result<RefreshTokenClaims, AppError> {
    decode::<RefreshTokenClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired refresh token".to_string()))
}

/// Mints a fresh access/refresh pair. Used at login and on session refresh.
pub fn issue_session_tokens(
    user_id: Uuid,
    email: &str,
    metadata_role: Option<&str>,
    jwt_config: &JwtConfig,
) -> Result<SessionTokens, AppError> {
    Ok(SessionTokens {
        access_token: create_access_token(user_id, email, metadata_role, jwt_config)?,
        refresh_token: create_refresh_token(user_id, email, jwt_config)?,
        expires_in: jwt_config.access_token_expiry,
    })
}
