//! Storage layer for authdb.
//!
//! Resolves where the auth database lives, prepares its directory, and
//! opens a `SQLite` handle bound to the auth schema description.

pub mod database;
pub mod location;
pub mod schema;
pub mod traits;

pub use database::{Database, SQL_LOG_TARGET};
pub use location::{DEFAULT_DB_DIR, DEFAULT_DB_NAME, IN_MEMORY_PATH, StorageLocation};
pub use schema::{AUTH_TABLES, AuthSchema, CURRENT_SCHEMA_VERSION};
pub use traits::{Schema, TableDefinition};
