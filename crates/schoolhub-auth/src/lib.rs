//! # SchoolHub Auth
//!
//! Session tokens for the SchoolHub API.
//!
//! A session is a pair of JWTs minted at login:
//!
//! - **Access token** ([`Claims`]): short-lived, sent as a bearer token or in the
//!   access cookie; carries the user id, email and the role recorded in the user's
//!   sign-up metadata.
//! - **Refresh token** ([`RefreshTokenClaims`]): long-lived, kept in the refresh
//!   cookie; the session middleware trades it for a new pair once the access
//!   token expires.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_auth::{issue_session_tokens, verify_token};
//! use schoolhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let tokens = issue_session_tokens(user_id, "user@example.com", Some("teacher"), &config)?;
//! let claims = verify_token(&tokens.access_token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{Claims, RefreshTokenClaims, SessionTokens};
pub use jwt::{
    create_access_token, create_refresh_token, issue_session_tokens, verify_refresh_token,
    verify_token,
};
