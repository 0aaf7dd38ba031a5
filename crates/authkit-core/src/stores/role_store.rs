//! Role store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Role;
use crate::error::StoreError;

#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Role>, StoreError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError>;
    async fn list(&self) -> Result<Vec<Role>, StoreError>;
    async fn create(&self, role: &Role) -> Result<Role, StoreError>;
    async fn update(&self, role: &Role) -> Result<Role, StoreError>;
    async fn delete(&self, id: &Uuid) -> Result<(), StoreError>;

    // Membership
    async fn add_to_role(&self, user_id: &Uuid, role_name: &str) -> Result<(), StoreError>;
    async fn remove_from_role(&self, user_id: &Uuid, role_name: &str) -> Result<(), StoreError>;
    async fn roles_for_user(&self, user_id: &Uuid) -> Result<Vec<Role>, StoreError>;
    async fn users_in_role(&self, role_name: &str) -> Result<Vec<Uuid>, StoreError>;
    async fn is_in_role(&self, user_id: &Uuid, role_name: &str) -> Result<bool, StoreError>;
}
