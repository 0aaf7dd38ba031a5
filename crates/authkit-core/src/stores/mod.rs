//! Store traits (ports) defining the identity-storage contract

pub mod claim_store;
pub mod login_store;
pub mod role_store;
pub mod token_store;
pub mod user_store;

pub use claim_store::ClaimStore;
pub use login_store::LoginStore;
pub use role_store::RoleStore;
pub use token_store::TokenStore;
pub use user_store::UserStore;
