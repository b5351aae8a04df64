//! Session cookies.
//!
//! Both cookies are `HttpOnly`, `SameSite=Lax` and scoped to `/`. Clearing a
//! cookie sends it back empty with `Max-Age=0`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration as CookieDuration;

use schoolhub_auth::SessionTokens;
use schoolhub_config::{JwtConfig, SessionConfig};

fn session_cookie(name: &str, value: &str, max_age: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), value.to_string());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_max_age(CookieDuration::seconds(max_age.max(0)));
    cookie
}

/// Cookies persisting a freshly issued token pair.
pub fn session_cookies(
    tokens: &SessionTokens,
    session: &SessionConfig,
    jwt: &JwtConfig,
) -> [Cookie<'static>; 2] {
    [
        session_cookie(
            &session.access_cookie_name,
            &tokens.access_token,
            jwt.access_token_expiry,
            session.secure_cookies,
        ),
        session_cookie(
            &session.refresh_cookie_name,
            &tokens.refresh_token,
            jwt.refresh_token_expiry,
            session.secure_cookies,
        ),
    ]
}

/// Cookies removing both session tokens from the browser.
pub fn cleared_cookies(session: &SessionConfig) -> [Cookie<'static>; 2] {
    [
        session_cookie(&session.access_cookie_name, "", 0, session.secure_cookies),
        session_cookie(&session.refresh_cookie_name, "", 0, session.secure_cookies),
    ]
}

/// Queues `cookies` on `jar` so they are written as `Set-Cookie` headers.
pub fn with_cookies(jar: CookieJar, cookies: [Cookie<'static>; 2]) -> CookieJar {
    cookies.into_iter().fold(jar, |jar, cookie| jar.add(cookie))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> SessionTokens {
        SessionTokens {
            access_token: "access.jwt.value".to_string(),
            refresh_token: "refresh.jwt.value".to_string(),
            expires_in: 3600,
        }
    }

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
            refresh_token_expiry: 604800,
        }
    }

    #[test]
    fn test_session_cookies() {
        let [access, refresh] = session_cookies(&tokens(), &SessionConfig::default(), &jwt());

        assert_eq!(access.name(), "schoolhub-access-token");
        assert_eq!(access.value(), "access.jwt.value");
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_eq!(access.secure(), Some(false));
        assert_eq!(access.max_age(), Some(CookieDuration::seconds(3600)));

        assert_eq!(refresh.name(), "schoolhub-refresh-token");
        assert_eq!(refresh.max_age(), Some(CookieDuration::seconds(604800)));
    }

    #[test]
    fn test_secure_flag() {
        let config = SessionConfig {
            secure_cookies: true,
            ..SessionConfig::default()
        };
        let [access, refresh] = session_cookies(&tokens(), &config, &jwt());

        assert_eq!(access.secure(), Some(true));
        assert_eq!(refresh.secure(), Some(true));
        assert!(access.to_string().contains("Secure"));
    }

    #[test]
    fn test_cleared_cookies_expire_immediately() {
        let [access, refresh] = cleared_cookies(&SessionConfig::default());

        assert_eq!(access.value(), "");
        assert_eq!(access.max_age(), Some(CookieDuration::ZERO));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(refresh.name(), "schoolhub-refresh-token");
        assert_eq!(refresh.max_age(), Some(CookieDuration::ZERO));
    }

    #[test]
    fn test_token_value_is_encoded() {
        let pair = SessionTokens {
            access_token: "a b;c".to_string(),
            ..tokens()
        };
        let [access, _] = session_cookies(&pair, &SessionConfig::default(), &jwt());

        let header = access.encoded().to_string();
        assert!(header.starts_with("schoolhub-access-token=a%20b%3Bc;"));
    }

    #[test]
    fn test_jar_carries_both_cookies() {
        let jar = with_cookies(
            CookieJar::new(),
            session_cookies(&tokens(), &SessionConfig::default(), &jwt()),
        );

        assert_eq!(
            jar.get("schoolhub-refresh-token").map(|c| c.value().to_string()),
            Some("refresh.jwt.value".to_string())
        );
        assert_eq!(jar.iter().count(), 2);
    }
}
