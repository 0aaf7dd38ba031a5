//! PostgreSQL user token store

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use authkit_core::domain::UserToken;
use authkit_core::error::StoreError;
use authkit_core::stores::TokenStore;

use super::guard;

pub struct PgTokenStore {
    pool: PgPool,
}

impl PgTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TokenRow {
    user_id: Uuid,
    provider: String,
    name: String,
    value: String,
}

impl From<TokenRow> for UserToken {
    fn from(row: TokenRow) -> Self {
        UserToken {
            user_id: row.user_id,
            provider: row.provider,
            name: row.name,
            value: row.value,
        }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn set_token(&self, token: &UserToken) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "INSERT INTO user_tokens (user_id, provider, name, value) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, provider, name) DO UPDATE SET value = EXCLUDED.value",
        )
        .bind(token.user_id)
        .bind(&token.provider)
        .bind(&token.name)
        .bind(&token.value)
        .execute(pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.constraint() == Some("fk_user_tokens_user") {
                    return StoreError::UserNotFound;
                }
            }
            error!("Database error setting token: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn get_token(
        &self,
        user_id: &Uuid,
        provider: &str,
        name: &str,
    ) -> Result<Option<UserToken>, StoreError> {
        let pool = guard(&self.pool)?;
        let row: Option<TokenRow> = sqlx::query_as(
            "SELECT user_id, provider, name, value FROM user_tokens \
             WHERE user_id = $1 AND provider = $2 AND name = $3",
        )
        .bind(user_id)
        .bind(provider)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            error!("Database error getting token: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(row.map(UserToken::from))
    }

    async fn remove_token(
        &self,
        user_id: &Uuid,
        provider: &str,
        name: &str,
    ) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "DELETE FROM user_tokens \
             WHERE user_id = $1 AND provider = $2 AND name = $3",
        )
        .bind(user_id)
        .bind(provider)
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database error removing token: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }
}
