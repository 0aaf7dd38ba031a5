//! Claim store trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UserClaim;
use crate::error::StoreError;

#[async_trait]
pub trait ClaimStore: Send + Sync {
    async fn claims_for_user(&self, user_id: &Uuid) -> Result<Vec<UserClaim>, StoreError>;
    async fn add_claim(&self, claim: &UserClaim) -> Result<UserClaim, StoreError>;
    /// Removes every claim of the user matching the type/value pair.
    async fn remove_claim(
        &self,
        user_id: &Uuid,
        claim_type: &str,
        claim_value: &str,
    ) -> Result<(), StoreError>;
    /// Rewrites all claims of `claim_type` for the user to hold `new_value`.
    async fn replace_claim(
        &self,
        user_id: &Uuid,
        claim_type: &str,
        new_value: &str,
    ) -> Result<(), StoreError>;
}
