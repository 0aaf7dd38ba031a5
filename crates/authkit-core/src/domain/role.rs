//! Role entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use authkit_shared::{new_id, EntityId};

use super::normalize;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Role {
    pub id: EntityId,

    #[validate(length(min = 2, max = 100, message = "Role name must be between 2 and 100 characters"))]
    pub name: String,
    pub normalized_name: String,

    #[validate(length(max = 1000, message = "Description too long"))]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Role {
    pub fn new(name: &str, description: Option<String>) -> Result<Self, validator::ValidationErrors> {
        let name = name.trim().to_string();
        let role = Self {
            id: new_id(),
            normalized_name: normalize(&name),
            name,
            description: description.map(|d| d.trim().to_string()),
            created_at: Utc::now(),
            modified_at: None,
        };

        role.validate()?;
        Ok(role)
    }

    pub fn rename(&mut self, name: &str) -> Result<(), validator::ValidationErrors> {
        let name = name.trim().to_string();
        let normalized = normalize(&name);
        let previous = (std::mem::replace(&mut self.name, name), std::mem::take(&mut self.normalized_name));
        self.normalized_name = normalized;
        if let Err(e) = self.validate() {
            self.name = previous.0;
            self.normalized_name = previous.1;
            return Err(e);
        }
        self.modified_at = Some(Utc::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_role() {
        let role = Role::new("  Admin ", Some("Administrators".to_string())).unwrap();
        assert_eq!(role.name, "Admin");
        assert_eq!(role.normalized_name, "ADMIN");
    }

    #[test]
    fn test_rename_rejects_invalid_and_restores() {
        let mut role = Role::new("Admin", None).unwrap();
        assert!(role.rename("x").is_err());
        assert_eq!(role.name, "Admin");
        assert_eq!(role.normalized_name, "ADMIN");
    }
}
