//! Token store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UserToken;
use crate::error::StoreError;

#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Upserts the token slot `(user_id, provider, name)`.
    async fn set_token(&self, token: &UserToken) -> Result<(), StoreError>;
    async fn get_token(
        &self,
        user_id: &Uuid,
        provider: &str,
        name: &str,
    ) -> Result<Option<UserToken>, StoreError>;
    async fn remove_token(
        &self,
        user_id: &Uuid,
        provider: &str,
        name: &str,
    ) -> Result<(), StoreError>;
}
