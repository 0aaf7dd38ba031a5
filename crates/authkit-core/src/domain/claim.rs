//! User claim entity

use serde::{Deserialize, Serialize};

use authkit_shared::{new_id, EntityId};

/// A typed key/value statement attached to a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    pub id: EntityId,
    pub user_id: EntityId,
    pub claim_type: String,
    pub claim_value: String,
}

impl UserClaim {
    pub fn new(user_id: EntityId, claim_type: &str, claim_value: &str) -> Self {
        Self {
            id: new_id(),
            user_id,
            claim_type: claim_type.trim().to_string(),
            claim_value: claim_value.trim().to_string(),
        }
    }
}
