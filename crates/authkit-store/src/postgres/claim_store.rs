//! PostgreSQL claim store

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use authkit_core::domain::UserClaim;
use authkit_core::error::StoreError;
use authkit_core::stores::ClaimStore;

use super::guard;

pub struct PgClaimStore {
    pool: PgPool,
}

impl PgClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClaimRow {
    id: Uuid,
    user_id: Uuid,
    claim_type: String,
    claim_value: String,
}

impl From<ClaimRow> for UserClaim {
    fn from(row: ClaimRow) -> Self {
        UserClaim {
            id: row.id,
            user_id: row.user_id,
            claim_type: row.claim_type,
            claim_value: row.claim_value,
        }
    }
}

fn map_fk_err(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error() {
        if db.constraint() == Some("fk_user_claims_user") {
            return StoreError::UserNotFound;
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl ClaimStore for PgClaimStore {
    async fn claims_for_user(&self, user_id: &Uuid) -> Result<Vec<UserClaim>, StoreError> {
        let pool = guard(&self.pool)?;
        let rows: Vec<ClaimRow> = sqlx::query_as(
            "SELECT id, user_id, claim_type, claim_value FROM user_claims \
             WHERE user_id = $1 ORDER BY claim_type, claim_value",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("Database error listing claims for user {}: {}", user_id, e);
            StoreError::Database(e.to_string())
        })?;

        Ok(rows.into_iter().map(UserClaim::from).collect())
    }

    async fn add_claim(&self, claim: &UserClaim) -> Result<UserClaim, StoreError> {
        let pool = guard(&self.pool)?;
        let row: ClaimRow = sqlx::query_as(
            "INSERT INTO user_claims (id, user_id, claim_type, claim_value) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, claim_type, claim_value",
        )
        .bind(claim.id)
        .bind(claim.user_id)
        .bind(&claim.claim_type)
        .bind(&claim.claim_value)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            error!("Database error adding claim: {}", e);
            map_fk_err(e)
        })?;

        Ok(row.into())
    }

    async fn remove_claim(
        &self,
        user_id: &Uuid,
        claim_type: &str,
        claim_value: &str,
    ) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "DELETE FROM user_claims \
             WHERE user_id = $1 AND claim_type = $2 AND claim_value = $3",
        )
        .bind(user_id)
        .bind(claim_type)
        .bind(claim_value)
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database error removing claim: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn replace_claim(
        &self,
        user_id: &Uuid,
        claim_type: &str,
        new_value: &str,
    ) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "UPDATE user_claims SET claim_value = $3 \
             WHERE user_id = $1 AND claim_type = $2",
        )
        .bind(user_id)
        .bind(claim_type)
        .bind(new_value)
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database error replacing claim: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }
}
