//! Login store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UserLogin;
use crate::error::StoreError;

#[async_trait]
pub trait LoginStore: Send + Sync {
    async fn add_login(&self, login: &UserLogin) -> Result<(), StoreError>;
    async fn remove_login(
        &self,
        user_id: &Uuid,
        provider: &str,
        provider_key: &str,
    ) -> Result<(), StoreError>;
    async fn logins_for_user(&self, user_id: &Uuid) -> Result<Vec<UserLogin>, StoreError>;
    async fn find_user_id_by_login(
        &self,
        provider: &str,
        provider_key: &str,
    ) -> Result<Option<Uuid>, StoreError>;
}
