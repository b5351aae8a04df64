//! JWT claim structures for session tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in access tokens.
///
/// Unknown fields are rejected so a refresh token (which carries `jti`) can
/// never pass as an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub email: String,
    /// Role recorded in the user's sign-up metadata when the token was minted.
    /// Informational only: the session middleware resolves the live role from
    /// the identity provider on every request.
    #[serde(default)]
    pub metadata_role: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

/// Claims embedded in refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
    /// Unique token identifier so two refreshes in the same second still differ
    pub jti: String,
}

/// An access/refresh token pair.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}
