use std::fmt;
use std::sync::Arc;

use schoolhub_config::{CorsConfig, EmailConfig, JwtConfig, SessionConfig};
use schoolhub_db::{IdentityProvider, PgProvider, SchoolStore, init_db_pool};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub store: Arc<dyn SchoolStore>,
    pub jwt_config: JwtConfig,
    pub session_config: SessionConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &"<redacted>")
            .field("session_config", &self.session_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Builds state around a single object that provides both identity and data.
    pub fn with_provider<P>(provider: Arc<P>) -> Self
    where
        P: IdentityProvider + SchoolStore + 'static,
    {
        Self {
            identity: provider.clone(),
            store: provider,
            jwt_config: JwtConfig::from_env(),
            session_config: SessionConfig::from_env(),
            email_config: EmailConfig::from_env(),
            cors_config: CorsConfig::from_env(),
        }
    }
}

pub async fn init_app_state(database_url: &str) -> Result<AppState, sqlx::Error> {
    let pool = init_db_pool(database_url).await?;
    Ok(AppState::with_provider(Arc::new(PgProvider::new(pool))))
}
