use anyhow::anyhow;
use uuid::Uuid;

use schoolhub_core::hash_password;
use schoolhub_db::{IdentityProvider, PgPool, PgProvider};
use schoolhub_models::auth::{SignUp, UserMetadata};
use schoolhub_models::roles::UserRole;

/// Creates an admin account with its profile row. Returns the new user id.
pub async fn create_admin(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow!(e.message()))?;
    let provider = PgProvider::new(pool.clone());

    let user = provider
        .sign_up(SignUp {
            email: email.trim().to_lowercase(),
            password_hash,
            metadata: UserMetadata {
                first_name: Some(first_name.to_string()),
                last_name: Some(last_name.to_string()),
                role: Some(UserRole::Admin.as_str().to_string()),
            },
            role: UserRole::Admin,
        })
        .await
        .map_err(|e| anyhow!(e.message()))?;

    Ok(user.id)
}
