//! PostgreSQL store implementations

pub mod claim_store;
pub mod login_store;
pub mod role_store;
pub mod token_store;
pub mod user_store;

pub use claim_store::PgClaimStore;
pub use login_store::PgLoginStore;
pub use role_store::PgRoleStore;
pub use token_store::PgTokenStore;
pub use user_store::PgUserStore;

use authkit_core::error::StoreError;
use sqlx::PgPool;

/// Closed-context check performed before every store operation.
pub(crate) fn guard(pool: &PgPool) -> Result<&PgPool, StoreError> {
    if pool.is_closed() {
        Err(StoreError::ContextClosed)
    } else {
        Ok(pool)
    }
}
