//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const MIN_USER_NAME_LENGTH: usize = 2;
pub const MAX_USER_NAME_LENGTH: usize = 64;
