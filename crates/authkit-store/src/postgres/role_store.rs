//! PostgreSQL role store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use authkit_core::domain::{normalize, Role};
use authkit_core::error::StoreError;
use authkit_core::stores::RoleStore;

use super::guard;

const ROLE_COLUMNS: &str = "id, name, normalized_name, description, created_at, modified_at";

pub struct PgRoleStore {
    pool: PgPool,
}

impl PgRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    normalized_name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    modified_at: Option<DateTime<Utc>>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            name: row.name,
            normalized_name: row.normalized_name,
            description: row.description,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn map_write_err(e: sqlx::Error, role: &Role) -> StoreError {
    if let Some(db) = e.as_database_error() {
        if db.constraint() == Some("ux_roles_normalized_name") {
            return StoreError::DuplicateRoleName(role.name.clone());
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl RoleStore for PgRoleStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1");
        let row: Option<RoleRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error finding role by id: {}", e);
                StoreError::Database(e.to_string())
            })?;

        Ok(row.map(Role::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles WHERE normalized_name = $1");
        let row: Option<RoleRow> = sqlx::query_as(&sql)
            .bind(normalize(name))
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error finding role by name: {}", e);
                StoreError::Database(e.to_string())
            })?;

        Ok(row.map(Role::from))
    }

    async fn list(&self) -> Result<Vec<Role>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!("SELECT {ROLE_COLUMNS} FROM roles ORDER BY normalized_name");
        let rows: Vec<RoleRow> = sqlx::query_as(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("Database error listing roles: {}", e);
                StoreError::Database(e.to_string())
            })?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn create(&self, role: &Role) -> Result<Role, StoreError> {
        let pool = guard(&self.pool)?;
        info!("Creating role: {}", role.name);

        let sql = format!(
            "INSERT INTO roles ({ROLE_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ROLE_COLUMNS}"
        );
        let row: RoleRow = sqlx::query_as(&sql)
            .bind(role.id)
            .bind(&role.name)
            .bind(&role.normalized_name)
            .bind(&role.description)
            .bind(role.created_at)
            .bind(role.modified_at)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                error!("Database error creating role: {}", e);
                map_write_err(e, role)
            })?;

        Ok(row.into())
    }

    async fn update(&self, role: &Role) -> Result<Role, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!(
            "UPDATE roles SET name = $2, normalized_name = $3, description = $4, \
             modified_at = $5 WHERE id = $1 RETURNING {ROLE_COLUMNS}"
        );
        let row: Option<RoleRow> = sqlx::query_as(&sql)
            .bind(role.id)
            .bind(&role.name)
            .bind(&role.normalized_name)
            .bind(&role.description)
            .bind(role.modified_at)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                error!("Database error updating role {}: {}", role.id, e);
                map_write_err(e, role)
            })?;

        row.map(Role::from).ok_or(StoreError::RoleNotFound)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                error!("Database error deleting role {}: {}", id, e);
                StoreError::Database(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RoleNotFound);
        }
        info!("Role deleted: {}", id);
        Ok(())
    }

    async fn add_to_role(&self, user_id: &Uuid, role_name: &str) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        let result = sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) \
             SELECT $1, id FROM roles WHERE normalized_name = $2 \
             ON CONFLICT (user_id, role_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(normalize(role_name))
        .execute(pool)
        .await
        .map_err(|e| {
            if let Some(db) = e.as_database_error() {
                if db.constraint() == Some("fk_user_roles_user") {
                    return StoreError::UserNotFound;
                }
            }
            error!("Database error adding user {} to role: {}", user_id, e);
            StoreError::Database(e.to_string())
        })?;

        // Zero rows with no conflict means the role name did not match.
        if result.rows_affected() == 0 {
            let exists = self.is_in_role(user_id, role_name).await?;
            if !exists {
                return Err(StoreError::RoleNotFound);
            }
        }
        Ok(())
    }

    async fn remove_from_role(&self, user_id: &Uuid, role_name: &str) -> Result<(), StoreError> {
        let pool = guard(&self.pool)?;
        sqlx::query(
            "DELETE FROM user_roles USING roles \
             WHERE user_roles.role_id = roles.id \
               AND user_roles.user_id = $1 AND roles.normalized_name = $2",
        )
        .bind(user_id)
        .bind(normalize(role_name))
        .execute(pool)
        .await
        .map_err(|e| {
            error!("Database error removing user {} from role: {}", user_id, e);
            StoreError::Database(e.to_string())
        })?;

        Ok(())
    }

    async fn roles_for_user(&self, user_id: &Uuid) -> Result<Vec<Role>, StoreError> {
        let pool = guard(&self.pool)?;
        let sql = format!(
            "SELECT r.id, r.name, r.normalized_name, r.description, r.created_at, r.modified_at \
             FROM roles r \
             JOIN user_roles ur ON ur.role_id = r.id \
             WHERE ur.user_id = $1 ORDER BY r.normalized_name"
        );
        let rows: Vec<RoleRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                error!("Database error listing roles for user {}: {}", user_id, e);
                StoreError::Database(e.to_string())
            })?;

        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn users_in_role(&self, role_name: &str) -> Result<Vec<Uuid>, StoreError> {
        let pool = guard(&self.pool)?;
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT ur.user_id FROM user_roles ur \
             JOIN roles r ON r.id = ur.role_id \
             WHERE r.normalized_name = $1",
        )
        .bind(normalize(role_name))
        .fetch_all(pool)
        .await
        .map_err(|e| {
            error!("Database error listing users in role: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(ids)
    }

    async fn is_in_role(&self, user_id: &Uuid, role_name: &str) -> Result<bool, StoreError> {
        let pool = guard(&self.pool)?;
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM user_roles ur \
                JOIN roles r ON r.id = ur.role_id \
                WHERE ur.user_id = $1 AND r.normalized_name = $2)",
        )
        .bind(user_id)
        .bind(normalize(role_name))
        .fetch_one(pool)
        .await
        .map_err(|e| {
            error!("Database error checking role membership: {}", e);
            StoreError::Database(e.to_string())
        })?;

        Ok(exists)
    }
}
