//! # DriveDesk Config
//!
//! Configuration types for DriveDesk, loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`logging`]: Log level and log file output
//! - [`pagination`]: Default page size for listings
//!
//! # Example
//!
//! ```ignore
//! use drivedesk_config::{DatabaseConfig, LogConfig, PaginationConfig};
//!
//! let database = DatabaseConfig::from_env()?;
//! let logging = LogConfig::from_env();
//! let pagination = PaginationConfig::from_env();
//! ```

pub mod database;
pub mod logging;
pub mod pagination;

use std::env;

pub use database::DatabaseConfig;
pub use logging::LogConfig;
pub use pagination::PaginationConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Reads `key` and parses it, falling back to `default` when unset or invalid.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
