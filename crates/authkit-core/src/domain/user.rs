//! User account entity and the user-type binding seam

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use authkit_shared::{new_id, EntityId};

use super::normalize;

/// The fixed base-identity column set shared by every user type bound to the
/// persistence context. Application-specific fields live in the
/// [`IdentityUser::Profile`] extension, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserAccount {
    pub id: EntityId,

    #[validate(length(min = 2, max = 64, message = "User name must be between 2 and 64 characters"))]
    pub user_name: String,
    pub normalized_user_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub normalized_email: String,
    pub email_confirmed: bool,

    /// Opaque credential material; hashing happens outside this layer.
    pub password_hash: Option<String>,
    pub security_stamp: String,

    pub phone_number: Option<String>,

    pub lockout_end: Option<DateTime<Utc>>,
    pub lockout_enabled: bool,
    pub access_failed_count: i32,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    pub fn new(user_name: &str, email: &str) -> Result<Self, validator::ValidationErrors> {
        let user_name = user_name.trim().to_string();
        let email = email.trim().to_string();
        let account = Self {
            id: new_id(),
            normalized_user_name: normalize(&user_name),
            user_name,
            normalized_email: normalize(&email),
            email,
            email_confirmed: false,
            password_hash: None,
            security_stamp: new_id().simple().to_string(),
            phone_number: None,
            lockout_end: None,
            lockout_enabled: true,
            access_failed_count: 0,
            created_at: Utc::now(),
            modified_at: None,
            removed_at: None,
        };

        account.validate()?;
        Ok(account)
    }

    /// Re-derive the normalized lookup forms after a rename or email change.
    pub fn renormalize(&mut self) {
        self.normalized_user_name = normalize(&self.user_name);
        self.normalized_email = normalize(&self.email);
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(Utc::now());
    }

    pub fn soft_delete(&mut self) {
        self.removed_at = Some(Utc::now());
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }

    pub fn is_locked_out(&self) -> bool {
        self.lockout_enabled
            && self.lockout_end.map(|end| end > Utc::now()).unwrap_or(false)
    }
}

/// Binds a concrete user type to the identity storage contract.
///
/// The storage layer persists the [`UserAccount`] columns directly and
/// marshals the `Profile` extension through a single `jsonb` column, so an
/// application adds fields to its user type without touching the schema.
pub trait IdentityUser: Clone + Send + Sync + Unpin + 'static {
    type Profile: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static;

    fn from_parts(account: UserAccount, profile: Self::Profile) -> Self;
    fn into_parts(self) -> (UserAccount, Self::Profile);
    fn account(&self) -> &UserAccount;
    fn account_mut(&mut self) -> &mut UserAccount;
    fn profile(&self) -> &Self::Profile;
}

/// Stock user type with no profile extension. Applications are expected to
/// bind their own type instead of this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultUser {
    #[serde(flatten)]
    pub account: UserAccount,
}

impl IdentityUser for DefaultUser {
    type Profile = ();

    fn from_parts(account: UserAccount, _profile: ()) -> Self {
        Self { account }
    }

    fn into_parts(self) -> (UserAccount, ()) {
        (self.account, ())
    }

    fn account(&self) -> &UserAccount {
        &self.account
    }

    fn account_mut(&mut self) -> &mut UserAccount {
        &mut self.account
    }

    fn profile(&self) -> &() {
        &()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_normalizes() {
        let account = UserAccount::new("  alice ", " Alice@Example.com ").unwrap();
        assert_eq!(account.user_name, "alice");
        assert_eq!(account.normalized_user_name, "ALICE");
        assert_eq!(account.email, "Alice@Example.com");
        assert_eq!(account.normalized_email, "ALICE@EXAMPLE.COM");
        assert!(!account.email_confirmed);
        assert!(account.password_hash.is_none());
    }

    #[test]
    fn test_new_account_rejects_short_user_name() {
        assert!(UserAccount::new("a", "a@example.com").is_err());
    }

    #[test]
    fn test_new_account_rejects_bad_email() {
        assert!(UserAccount::new("alice", "not-an-email").is_err());
    }

    #[test]
    fn test_soft_delete() {
        let mut account = UserAccount::new("alice", "alice@example.com").unwrap();
        assert!(!account.is_deleted());
        account.soft_delete();
        assert!(account.is_deleted());
    }

    #[test]
    fn test_lockout_requires_future_end() {
        let mut account = UserAccount::new("alice", "alice@example.com").unwrap();
        assert!(!account.is_locked_out());
        account.lockout_end = Some(Utc::now() + chrono::Duration::minutes(5));
        assert!(account.is_locked_out());
        account.lockout_enabled = false;
        assert!(!account.is_locked_out());
    }
}
