//! Identity domain entities

pub mod claim;
pub mod login;
pub mod role;
pub mod token;
pub mod user;

pub use claim::UserClaim;
pub use login::UserLogin;
pub use role::Role;
pub use token::UserToken;
pub use user::{DefaultUser, IdentityUser, UserAccount};

/// Canonical form used for case-insensitive lookups (user names, emails,
/// role names).
pub fn normalize(input: &str) -> String {
    input.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(normalize("  alice@Example.com "), "ALICE@EXAMPLE.COM");
    }
}
