//! External login entity

use serde::{Deserialize, Serialize};

use authkit_shared::EntityId;

/// Links a user account to an external authentication provider.
/// `(provider, provider_key)` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLogin {
    pub user_id: EntityId,
    pub provider: String,
    pub provider_key: String,
    pub provider_display_name: Option<String>,
}

impl UserLogin {
    pub fn new(
        user_id: EntityId,
        provider: &str,
        provider_key: &str,
        provider_display_name: Option<String>,
    ) -> Self {
        Self {
            user_id,
            provider: provider.trim().to_string(),
            provider_key: provider_key.trim().to_string(),
            provider_display_name,
        }
    }
}
