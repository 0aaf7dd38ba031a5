//! # Authkit Store
//!
//! PostgreSQL implementation of the identity-storage contract: the generic
//! persistence context, one store per entity set, and embedded migrations.

pub mod connection;
pub mod context;
pub mod postgres;

pub use connection::create_lazy_pool;
pub use context::IdentityContext;
pub use postgres::{PgClaimStore, PgLoginStore, PgRoleStore, PgTokenStore, PgUserStore};
