//! Database configuration.
//!
//! Configuration is read once at startup from environment-style key/value
//! lookups and held in [`DatabaseConfig`]. Nothing else in the crate reads
//! the environment directly.

use crate::storage::StorageLocation;
use std::path::PathBuf;

/// Environment key overriding the database file path.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment key toggling SQL diagnostic logging.
pub const DATABASE_LOGGING_ENV: &str = "DATABASE_LOGGING";

/// Typed database configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Raw storage-location override. Blank values fall back to the default path.
    pub url: Option<String>,
    /// Whether SQL statements issued through the handle are logged.
    pub logging: bool,
}

impl DatabaseConfig {
    /// Builds a configuration from raw option values.
    ///
    /// `logging` is enabled only when the value is exactly `"true"`.
    #[must_use]
    pub fn new(url: Option<String>, logging: Option<&str>) -> Self {
        Self {
            url,
            logging: parse_logging_flag(logging),
        }
    }

    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_ENV);
        let logging = lookup(DATABASE_LOGGING_ENV);
        Self::new(url, logging.as_deref())
    }

    /// Returns the non-blank override, if any.
    #[must_use]
    pub fn url_override(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Resolves the storage location against the current working directory.
    ///
    /// Falls back to a relative default if the working directory is unavailable.
    #[must_use]
    pub fn storage_location(&self) -> StorageLocation {
        let cwd = std::env::current_dir().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "working directory unavailable, using relative default path");
            PathBuf::new()
        });
        StorageLocation::resolve(self.url.as_deref(), &cwd)
    }
}

/// Parses the diagnostic-logging flag. Case-sensitive.
#[must_use]
pub fn parse_logging_flag(value: Option<&str>) -> bool {
    value == Some("true")
}
