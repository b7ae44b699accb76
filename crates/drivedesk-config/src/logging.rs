//! Logging settings.
//!
//! - `LOG_LEVEL`: Level for DriveDesk targets (default: "info")
//! - `LOG_DIR`: Directory for rolling log files (default: "storage/logs")
//! - `LOG_FILES_ENABLED`: Write log files in addition to the console (default: true)

use std::env;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub files_enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "storage/logs".to_string(),
            files_enabled: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            level: env::var("LOG_LEVEL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.level),
            dir: env::var("LOG_DIR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.dir),
            files_enabled: env_or("LOG_FILES_ENABLED", defaults.files_enabled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.dir, "storage/logs");
        assert!(config.files_enabled);
    }
}
