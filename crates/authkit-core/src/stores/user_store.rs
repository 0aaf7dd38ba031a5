//! User store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use authkit_shared::Pagination;

use crate::domain::IdentityUser;
use crate::error::StoreError;

/// CRUD surface over user accounts. Lookups by name and email match against
/// the normalized forms; soft-deleted accounts are excluded everywhere.
#[async_trait]
pub trait UserStore<U: IdentityUser>: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<U>, StoreError>;
    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<U>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<U>, StoreError>;
    async fn list(&self, pagination: &Pagination) -> Result<Vec<U>, StoreError>;
    async fn create(&self, user: &U) -> Result<U, StoreError>;
    async fn update(&self, user: &U) -> Result<U, StoreError>;
    async fn delete(&self, id: &Uuid) -> Result<(), StoreError>;
}
