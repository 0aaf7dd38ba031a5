//! # Authkit Shared
//!
//! Shared configuration, telemetry, and common types for the authkit workspace.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::AppError;
pub use types::*;
