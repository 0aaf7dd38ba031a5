//! PostgreSQL user store

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use authkit_core::domain::{normalize, IdentityUser, UserAccount};
use authkit_core::error::StoreError;
use authkit_core::stores::UserStore;
use authkit_shared::utils::mask_email;
use authkit_shared::Pagination;

use super::guard;

const USER_COLUMNS: &str = "id, user_name, normalized_user_name, email, normalized_email, \
     email_confirmed, password_hash, security_stamp, phone_number, lockout_end, \
     lockout_enabled, access_failed_count, profile, created_at, modified_at, removed_at";

pub struct PgUserStore<U: IdentityUser> {
    pool: PgPool,
    _user: PhantomData<fn() -> U>,
}

impl<U: IdentityUser> PgUserStore<U> {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, _user: PhantomData }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    user_name: String,
    normalized_user_name: String,
    email: String,
    normalized_email: String,
    email_confirmed: bool,
    password_hash: Option<String>,
    security_stamp: String,
    phone_number: Option<String>,
    lockout_end: Option<DateTime<Utc>>,
    lockout_enabled: bool,
    access_failed_count: i32,
    profile: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
    removed_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user<U: IdentityUser>(self) -> Result<U, StoreError> {
        let profile = match self.profile {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                error!("Corrupt profile column for user {}: {}", self.id, e);
                StoreError::Database(format!("corrupt profile column: {e}"))
            })?,
            None => U::Profile::default(),
        };
        let account = UserAccount {
            id: self.id,
            user_name: self.user_name,
            normalized_user_name: self.normalized_user_name,
            email: self.email,
            normalized_email: self.normalized_email,
            email_confirmed: self.email_confirmed,
            password_hash: self.password_hash,
            security_stamp: self.security_stamp,
            phone_number: self.phone_number,
            lockout_end: self.lockout_end,
            lockout_enabled: self.lockout_enabled,
            access_failed_count: self.access_failed_count,
            created_at: self.created_at,
            modified_at: self.modified_at,
            removed_at: self.removed_at,
        };
        Ok(U::from_parts(account, profile))
    }
}

fn encode_profile<U: IdentityUser>(user: &U) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(user.profile())
        .map_err(|e| StoreError::Database(format!("unserializable profile: {e}")))
}

/// Maps unique-index violations on the create/update paths to the duplicate
/// variants; everything else passes through as `Database`.
fn map_write_err(e: sqlx::Error, account: &UserAccount) -> StoreError {
    if let Some(db) = e.as_database_error() {
        match db.constraint() {
            Some("ux_users_normalized_user_name") => {
                return StoreError::DuplicateUserName(account.user_name.clone());
            }
            Some("ux_users_normalized_email") => {
                return StoreError::DuplicateEmail(account.email.clone());
            }
            _ => {}
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl<U: IdentityUser> UserStore<U> for PgUserStore<U> {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<U>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND removed_at IS NULL");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error finding user by id: {}", e);
                StoreError::Database(e.to_string())
            })?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<U>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE normalized_user_name = $1 AND removed_at IS NULL"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(normalize(user_name))
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error finding user by name: {}", e);
                StoreError::Database(e.to_string())
            })?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<U>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE normalized_email = $1 AND removed_at IS NULL"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(normalize(email))
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error finding user by email {}: {}", mask_email(email), e);
                StoreError::Database(e.to_string())
            })?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list(&self, pagination: &Pagination) -> Result<Vec<U>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE removed_at IS NULL \
             ORDER BY created_at, id LIMIT $1 OFFSET $2"
        );
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("Database error listing users: {}", e);
                StoreError::Database(e.to_string())
            })?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn create(&self, user: &U) -> Result<U, StoreError> {
        let pool = guard(&self.pool)?;
        let account = user.account();
        let profile = encode_profile(user)?;
        info!("Creating user {}", mask_email(&account.email));

        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {USER_COLUMNS}"
        );
        let row: UserRow = sqlx::query_as(&sql)
            .bind(account.id)
            .bind(&account.user_name)
            .bind(&account.normalized_user_name)
            .bind(&account.email)
            .bind(&account.normalized_email)
            .bind(account.email_confirmed)
            .bind(&account.password_hash)
            .bind(&account.security_stamp)
            .bind(&account.phone_number)
            .bind(account.lockout_end)
            .bind(account.lockout_enabled)
            .bind(account.access_failed_count)
            .bind(&profile)
            .bind(account.created_at)
            .bind(account.modified_at)
            .bind(account.removed_at)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                error!("Database error creating user: {}", e);
                map_write_err(e, account)
            })?;

        info!("User created: {}", row.id);
        row.into_user()
    }

    async fn update(&self, user: &U) -> Result<U, StoreError> {
        let pool = guard(&self.pool)?;
        let account = user.account();
        let profile = encode_profile(user)?;

        let sql = format!(
            "UPDATE users SET \
                user_name = $2, normalized_user_name = $3, \
                email = $4, normalized_email = $5, email_confirmed = $6, \
                password_hash = $7, security_stamp = $8, phone_number = $9, \
                lockout_end = $10, lockout_enabled = $11, access_failed_count = $12, \
                profile = $13, modified_at = $14, removed_at = $15 \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(account.id)
            .bind(&account.user_name)
            .bind(&account.normalized_user_name)
            .bind(&account.email)
            .bind(&account.normalized_email)
            .bind(account.email_confirmed)
            .bind(&account.password_hash)
            .bind(&account.security_stamp)
            .bind(&account.phone_number)
            .bind(account.lockout_end)
            .bind(account.lockout_enabled)
            .bind(account.access_failed_count)
            .bind(&profile)
            .bind(account.modified_at)
            .bind(account.removed_at)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error updating user {}: {}", account.id, e);
                map_write_err(e, account)
            })?;

        row.ok_or(StoreError::UserNotFound)?.into_user()
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        let result = sqlx::query(
            "UPDATE users SET removed_at = NOW() WHERE id = $1 AND removed_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database error deleting user {}: {}", id, e);
            StoreError::Database(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::UserNotFound);
        }
        info!("User removed: {}", id);
        Ok(())
    }
}
