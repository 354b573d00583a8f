//! # authdb
//!
//! Bootstrap for the local `SQLite` auth store.
//!
//! At startup authdb resolves where the database file lives (the
//! `DATABASE_URL` override, or `dev_db/auth.db` beneath the working
//! directory), makes sure the containing directory exists, opens the
//! database and binds it to the auth schema description. The resulting
//! [`Database`] handle is constructed once and passed to whatever needs
//! storage access.
//!
//! ## Features
//!
//! - **Path resolution**: blank overrides fall back to the default location
//! - **Idempotent setup**: the directory is created only if missing; tables
//!   only when [`Database::create_tables`] is asked for
//! - **SQL diagnostics**: `DATABASE_LOGGING=true` logs statements via `tracing`
//!
//! ```no_run
//! use authdb::{DatabaseConfig, initialize};
//!
//! let db = initialize(&DatabaseConfig::from_env())?;
//! db.create_tables()?;
//! assert!(db.table_exists("session")?);
//! db.close()?;
//! # Ok::<(), authdb::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod logging;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export configuration and initializer
pub use config::{DATABASE_LOGGING_ENV, DATABASE_URL_ENV, DatabaseConfig};
pub use init::{initialize, initialize_in, initialize_with};

// Re-export storage types
pub use storage::{AuthSchema, Database, Schema, StorageLocation};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
