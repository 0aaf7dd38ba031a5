//! Store errors

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Context has been closed")]
    ContextClosed,

    #[error("User not found")]
    UserNotFound,

    #[error("Role not found")]
    RoleNotFound,

    #[error("User name already exists: {0}")]
    DuplicateUserName(String),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Role name already exists: {0}")]
    DuplicateRoleName(String),

    #[error("Login already linked to a user")]
    DuplicateLogin,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}
