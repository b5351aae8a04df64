#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_auth::issue_session_tokens;
use schoolhub_config::{CorsConfig, EmailConfig, JwtConfig, SessionConfig};
use schoolhub_db::{IdentityProvider, MemoryProvider};
use schoolhub_models::auth::{SignUp, UserMetadata};
use schoolhub_models::roles::UserRole;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub token: String,
    pub refresh_token: String,
}

pub struct TestApp {
    pub provider: Arc<MemoryProvider>,
    pub state: AppState,
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
        refresh_token_expiry: 604800,
    }
}

impl TestApp {
    pub fn new() -> Self {
        let provider = Arc::new(MemoryProvider::new());
        let state = AppState {
            identity: provider.clone(),
            store: provider.clone(),
            jwt_config: jwt_config(),
            session_config: SessionConfig::default(),
            email_config: EmailConfig::disabled(),
            cors_config: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        };

        Self { provider, state }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    /// Creates an account directly through the provider, with a cheap hash.
    pub async fn create_user(&self, role: UserRole) -> TestUser {
        let email = generate_unique_email();
        let password_hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();

        let user = self
            .provider
            .sign_up(SignUp {
                email: email.clone(),
                password_hash,
                metadata: UserMetadata {
                    first_name: Some("Test".to_string()),
                    last_name: Some("User".to_string()),
                    role: Some(role.as_str().to_string()),
                },
                role,
            })
            .await
            .unwrap();

        let tokens =
            issue_session_tokens(user.id, &user.email, Some(role.as_str()), &jwt_config()).unwrap();

        TestUser {
            id: user.id,
            email,
            role,
            token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}
