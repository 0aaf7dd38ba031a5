//! PostgreSQL external login store

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use authkit_core::domain::UserLogin;
use authkit_core::error::StoreError;
use authkit_core::stores::LoginStore;

use super::guard;

pub struct PgLoginStore {
    pool: PgPool,
}

impl PgLoginStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LoginRow {
    user_id: Uuid,
    provider: String,
    provider_key: String,
    provider_display_name: Option<String>,
}

impl From<LoginRow> for UserLogin {
    fn from(row: LoginRow) -> Self {
        UserLogin {
            user_id: row.user_id,
            provider: row.provider,
            provider_key: row.provider_key,
            provider_display_name: row.provider_display_name,
        }
    }
}

#[async_trait]
impl LoginStore for PgLoginStore {
    async fn add_login(&self, login: &UserLogin) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "INSERT INTO user_logins (provider, provider_key, provider_display_name, user_id) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&login.provider)
        .bind(&login.provider_key)
        .bind(&login.provider_display_name)
        .bind(login.user_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                match db.constraint() {
                    Some("pk_user_logins") => return StoreError::DuplicateLogin,
                    Some("fk_user_logins_user") => return StoreError::UserNotFound,
                    _ => {}
                }
            }
            error!("Database error adding login: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn remove_login(
        &self,
        user_id: &Uuid,
        provider: &str,
        provider_key: &str,
    ) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "DELETE FROM user_logins \
             WHERE user_id = $1 AND provider = $2 AND provider_key = $3",
        )
        .bind(user_id)
        .bind(provider)
        .bind(provider_key)
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database error removing login: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn logins_for_user(&self, user_id: &Uuid) -> Result<Vec<UserLogin>, StoreError> {
        let pool = guard(&self.pool)?;
        let rows: Vec<LoginRow> = sqlx::query_as(
            "SELECT user_id, provider, provider_key, provider_display_name \
             FROM user_logins WHERE user_id = $1 ORDER BY provider",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("Database error listing logins for user {}: {}", user_id, e);
            StoreError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(UserLogin::from).collect())
    }

    async fn find_user_id_by_login(
        &self,
        provider: &str,
        provider_key: &str,
    ) -> Result<Option<Uuid>, StoreError> {
        let pool = guard(&self.pool)?;
        let user_id: Option<Uuid> = sqlx::query_scalar(
            "SELECT user_id FROM user_logins \
             WHERE provider = $1 AND provider_key = $2",
        )
        .bind(provider)
        .bind(provider_key)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!("Database error finding user by login: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(user_id)
    }
}
