//! Session cookie configuration.
//!
//! - `SESSION_COOKIE_NAME`: access token cookie (default: `schoolhub-access-token`)
//! - `REFRESH_COOKIE_NAME`: refresh token cookie (default: `schoolhub-refresh-token`)
//! - `SESSION_COOKIE_SECURE`: set the `Secure` attribute (default: false)
//! - `REDIRECT_BASE_URL`: base for post-registration links; the request origin is used when unset

use std::env;

#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    pub secure_cookies: bool,
    pub redirect_base_url: Option<String>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            access_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or_else(|_| "schoolhub-access-token".to_string()),
            refresh_cookie_name: env::var("REFRESH_COOKIE_NAME")
                .unwrap_or_else(|_| "schoolhub-refresh-token".to_string()),
            secure_cookies: env::var("SESSION_COOKIE_SECURE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
            redirect_base_url: env::var("REDIRECT_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "schoolhub-access-token".to_string(),
            refresh_cookie_name: "schoolhub-refresh-token".to_string(),
            secure_cookies: false,
            redirect_base_url: None,
        }
    }
}
