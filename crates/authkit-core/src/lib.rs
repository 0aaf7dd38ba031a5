//! # Authkit Core
//!
//! Domain entities, store traits, and errors for the identity persistence layer.

pub mod domain;
pub mod error;
pub mod stores;

pub use domain::*;
pub use error::StoreError;
