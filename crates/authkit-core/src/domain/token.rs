//! User token entity

use serde::{Deserialize, Serialize};

use authkit_shared::EntityId;

/// A named token slot scoped to `(user_id, provider, name)`; setting the same
/// slot again overwrites the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    pub user_id: EntityId,
    pub provider: String,
    pub name: String,
    pub value: String,
}

impl UserToken {
    pub fn new(user_id: EntityId, provider: &str, name: &str, value: &str) -> Self {
        Self {
            user_id,
            provider: provider.trim().to_string(),
            name: name.trim().to_string(),
            value: value.to_string(),
        }
    }
}
