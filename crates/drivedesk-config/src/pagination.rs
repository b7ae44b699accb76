//! Listing defaults.
//!
//! - `DEFAULT_PAGE_SIZE`: Page size used when a request omits `pageSize`
//!   (default: 10). Non-positive values fall back to the default.

use crate::env_or;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    pub default_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    pub const DEFAULT_PAGE_SIZE: i64 = 10;

    pub fn from_env() -> Self {
        Self::with_page_size(env_or("DEFAULT_PAGE_SIZE", Self::DEFAULT_PAGE_SIZE))
    }

    pub fn with_page_size(default_page_size: i64) -> Self {
        if default_page_size <= 0 {
            return Self::default();
        }

        Self { default_page_size }
    }
}
