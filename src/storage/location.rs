//! Storage location resolution.
//!
//! Decides where the database file lives and makes sure its directory
//! exists before `SQLite` is asked to open it.

use crate::error::{IoError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default database directory relative to the working directory.
pub const DEFAULT_DB_DIR: &str = "dev_db";

/// Default database file name.
pub const DEFAULT_DB_NAME: &str = "auth.db";

/// Path that `SQLite` opens as a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Filesystem location of the database file.
///
/// Computed once at startup and immutable afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLocation {
    path: PathBuf,
}

impl StorageLocation {
    /// Creates a location for an explicit path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the location from an optional override.
    ///
    /// The override is used verbatim when it is non-blank after trimming;
    /// otherwise the location is `<cwd>/dev_db/auth.db`.
    ///
    /// # Examples
    ///
    /// ```
    /// use authdb::storage::StorageLocation;
    /// use std::path::Path;
    ///
    /// let cwd = Path::new("/srv/app");
    /// let loc = StorageLocation::resolve(Some("   "), cwd);
    /// assert_eq!(loc.path(), Path::new("/srv/app/dev_db/auth.db"));
    ///
    /// let loc = StorageLocation::resolve(Some("/data/x.db"), cwd);
    /// assert_eq!(loc.path(), Path::new("/data/x.db"));
    /// ```
    #[must_use]
    pub fn resolve(url: Option<&str>, cwd: &Path) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default_in(cwd),
        }
    }

    /// Returns the default location beneath `cwd`.
    #[must_use]
    pub fn default_in(cwd: &Path) -> Self {
        Self::new(cwd.join(DEFAULT_DB_DIR).join(DEFAULT_DB_NAME))
    }

    /// Returns the in-memory location.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_PATH)
    }

    /// Returns the database file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the directory containing the database file.
    ///
    /// A bare file name lives in the working directory (`.`).
    #[must_use]
    pub fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Returns `true` if this location names the in-memory database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    /// Creates the containing directory and any missing ancestors.
    ///
    /// Idempotent: an existing directory is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::DirectoryFailed`] if the directory cannot be
    /// created, e.g. on permission errors or when a path component is a
    /// regular file.
    pub fn ensure_directory(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let dir = self.directory();
        if dir.is_dir() {
            tracing::debug!(directory = %dir.display(), "storage directory exists");
            return Ok(());
        }

        std::fs::create_dir_all(dir).map_err(|e| IoError::DirectoryFailed {
            path: dir.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(directory = %dir.display(), "created storage directory");

        Ok(())
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
