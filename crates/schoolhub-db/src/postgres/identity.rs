use sqlx::types::Json;
use tracing::instrument;
use uuid::Uuid;

use schoolhub_core::AppError;
use schoolhub_models::auth::{AuthUser, SignUp};
use schoolhub_models::profiles::Profile;

use super::PgProvider;
use crate::provider::IdentityProvider;

fn map_sign_up_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::bad_request(anyhow::anyhow!("User already registered"))
        }
        _ => AppError::database(err),
    }
}

#[async_trait::async_trait]
impl IdentityProvider for PgProvider {
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    async fn sign_up(&self, new_user: SignUp) -> Result<AuthUser, AppError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, AuthUser>(
            r#"
            INSERT INTO auth_users (email, password_hash, user_metadata)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, user_metadata, created_at
            "#,
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(Json(&new_user.metadata))
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sign_up_error)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, first_name, last_name, role)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&new_user.metadata.first_name)
        .bind(&new_user.metadata.last_name)
        .bind(new_user.role)
        .execute(&mut *tx)
        .await
        .map_err(map_sign_up_error)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AppError> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, email, password_hash, user_metadata, created_at FROM auth_users WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AppError> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, email, password_hash, user_metadata, created_at FROM auth_users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, email, first_name, last_name, role, avatar_url, created_at FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
