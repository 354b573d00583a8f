//! Connection initializer.
//!
//! Produces the single ready-to-use [`Database`] handle at startup:
//! resolve the storage location, ensure its directory exists, open the
//! database and bind it to the schema description. Any failure aborts
//! initialization; there is no retry and no partial result.

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::storage::{AuthSchema, Database, Schema, StorageLocation};
use std::path::Path;

/// Initializes the auth database from configuration.
///
/// The default location is resolved against the current working directory.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created, or a storage
/// error if the database cannot be opened or the schema cannot be applied.
pub fn initialize(config: &DatabaseConfig) -> Result<Database<AuthSchema>> {
    initialize_with(config.storage_location(), AuthSchema, config.logging)
}

/// Initializes the auth database, resolving the default location against `cwd`.
///
/// # Errors
///
/// See [`initialize`].
pub fn initialize_in(config: &DatabaseConfig, cwd: &Path) -> Result<Database<AuthSchema>> {
    let location = StorageLocation::resolve(config.url.as_deref(), cwd);
    initialize_with(location, AuthSchema, config.logging)
}

/// Initializes a database at `location` bound to an arbitrary schema description.
///
/// # Errors
///
/// See [`initialize`].
pub fn initialize_with<S: Schema>(
    location: StorageLocation,
    schema: S,
    logging: bool,
) -> Result<Database<S>> {
    tracing::debug!(path = %location, "resolved storage location");

    location.ensure_directory()?;

    let db = Database::open(location, schema, logging)?;
    tracing::info!(
        path = %db.location(),
        schema = db.schema().name(),
        logging,
        "database ready"
    );

    Ok(db)
}
