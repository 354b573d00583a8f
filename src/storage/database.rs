//! `SQLite` database handle.
//!
//! [`Database`] owns the connection to the auth store together with the
//! schema description it is bound to and the diagnostic-logging toggle.
//! Opening a handle never alters the file's tables; [`Database::create_tables`]
//! is the explicit step that does. Statements issued through the handle are
//! logged under the `authdb::sql` target when logging is enabled.

// SQLite stores all integers as i64. These casts are intentional and safe
// because we only read non-negative counts and sizes.
#![allow(clippy::cast_sign_loss)]

use crate::error::{Error, Result, StorageError};
use crate::storage::location::StorageLocation;
use crate::storage::schema::{
    AuthSchema, GET_INFO_SQL, LIST_TABLES_SQL, SCHEMA_INFO_SQL, SCHEMA_INFO_TABLE, SET_INFO_SQL,
    TABLE_EXISTS_SQL,
};
use crate::storage::traits::Schema;
use rusqlite::{Connection, OptionalExtension, Params, Row, Statement, Transaction, params};
use std::sync::{Mutex, MutexGuard};

/// Tracing target for SQL diagnostic logging.
pub const SQL_LOG_TARGET: &str = "authdb::sql";

/// Handle to the opened database.
///
/// The connection is guarded by a mutex so a single handle can be shared
/// between consumers through `&Database` or `Arc<Database>`.
///
/// # Examples
///
/// ```no_run
/// use authdb::storage::{AuthSchema, Database, StorageLocation};
///
/// let location = StorageLocation::new("dev_db/auth.db");
/// location.ensure_directory()?;
/// let db = Database::open(location, AuthSchema, false)?;
/// db.create_tables()?;
/// assert!(db.table_exists("user")?);
/// # Ok::<(), authdb::Error>(())
/// ```
pub struct Database<S: Schema = AuthSchema> {
    conn: Mutex<Connection>,
    location: StorageLocation,
    schema: S,
    logging: bool,
}

impl<S: Schema> Database<S> {
    /// Opens or creates the database and binds it to the schema description.
    ///
    /// The containing directory must already exist. Existing tables are
    /// left as they are and none are created.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file cannot be opened or is not
    /// a database.
    pub fn open(location: StorageLocation, schema: S, logging: bool) -> Result<Self> {
        let conn = Self::connect(&location)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location,
            schema,
            logging,
        })
    }

    /// Opens the connection and checks the file is a usable database.
    fn connect(location: &StorageLocation) -> Result<Connection> {
        let open_err = |e: rusqlite::Error| StorageError::Open {
            path: location.to_string(),
            reason: e.to_string(),
        };

        let conn = Connection::open(location.path()).map_err(open_err)?;

        conn.execute("PRAGMA foreign_keys = ON;", [])
            .map_err(open_err)?;

        // Opening is lazy; reading the catalog forces the header check.
        let _: i64 = conn
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))
            .map_err(open_err)?;

        Ok(conn)
    }

    /// Creates the tables of the schema description that are missing and
    /// records the schema name and version.
    ///
    /// Runs in a single transaction. Existing tables are not altered.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Schema`] with the `SQLite` message if any
    /// statement fails; nothing is created in that case.
    pub fn create_tables(&self) -> Result<()> {
        let schema_err = |e: rusqlite::Error| StorageError::Schema(e.to_string());
        let ddl = self.schema.ddl();
        let name = self.schema.name();
        let version = self.schema.version();

        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(schema_err)?;

        self.log_sql(SCHEMA_INFO_SQL);
        tx.execute_batch(SCHEMA_INFO_SQL).map_err(schema_err)?;
        self.log_sql(&ddl);
        tx.execute_batch(&ddl).map_err(schema_err)?;

        for (key, value) in [("name", name.to_string()), ("version", version.to_string())] {
            self.log_sql(SET_INFO_SQL);
            tx.execute(SET_INFO_SQL, params![key, value])
                .map_err(schema_err)?;
        }
        tx.commit().map_err(schema_err)?;

        tracing::info!(schema = name, version, "schema tables ready");
        Ok(())
    }

    /// Returns the storage location.
    #[must_use]
    pub const fn location(&self) -> &StorageLocation {
        &self.location
    }

    /// Returns the schema description.
    #[must_use]
    pub const fn schema(&self) -> &S {
        &self.schema
    }

    /// Returns whether SQL diagnostic logging is enabled.
    #[must_use]
    pub const fn logging_enabled(&self) -> bool {
        self.logging
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            StorageError::Database(format!("connection lock poisoned: {e}")).into()
        })
    }

    fn log_sql(&self, sql: &str) {
        if self.logging {
            tracing::info!(target: SQL_LOG_TARGET, sql = %sql.trim(), "query");
        }
    }

    /// Logs a statement after it ran, with its bound parameters expanded.
    fn log_statement(&self, sql: &str, stmt: &Statement<'_>) {
        if !self.logging {
            return;
        }
        if stmt.parameter_count() == 0 {
            self.log_sql(sql);
            return;
        }
        let expanded = stmt.expanded_sql().unwrap_or_default();
        tracing::info!(
            target: SQL_LOG_TARGET,
            sql = %sql.trim(),
            params = stmt.parameter_count(),
            expanded = %expanded.trim(),
            "query"
        );
    }

    fn prepare<'c>(&self, conn: &'c Connection, sql: &str) -> Result<Statement<'c>> {
        conn.prepare(sql).map_err(|e| -> Error {
            self.log_sql(sql);
            StorageError::from(e).into()
        })
    }

    /// Executes a single statement, returning the number of changed rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<usize> {
        let conn = self.lock()?;
        let mut stmt = self.prepare(&conn, sql)?;
        let changed = stmt.execute(params);
        self.log_statement(sql, &stmt);
        Ok(changed.map_err(StorageError::from)?)
    }

    /// Executes a batch of statements separated by semicolons.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.log_sql(sql);
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(StorageError::from)?;
        Ok(())
    }

    /// Runs a query expected to return exactly one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or returns no rows.
    pub fn query_row<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        let mut stmt = self.prepare(&conn, sql)?;
        let value = stmt.query_row(params, f);
        self.log_statement(sql, &stmt);
        Ok(value.map_err(StorageError::from)?)
    }

    /// Runs a query expected to return at most one row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn query_opt<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        let mut stmt = self.prepare(&conn, sql)?;
        let value = stmt.query_row(params, f).optional();
        self.log_statement(sql, &stmt);
        Ok(value.map_err(StorageError::from)?)
    }

    /// Runs a query and maps every returned row.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or any row mapping fails.
    pub fn query_all<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        let mut stmt = self.prepare(&conn, sql)?;
        let rows = stmt
            .query_map(params, f)
            .and_then(|mapped| mapped.collect::<rusqlite::Result<Vec<_>>>());
        self.log_statement(sql, &stmt);
        Ok(rows.map_err(StorageError::from)?)
    }

    /// Runs `f` inside a transaction, committing if it succeeds.
    ///
    /// Statements issued on the transaction itself are not logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot begin, `f` fails, or the
    /// commit fails. The transaction is rolled back on failure.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    {
        self.log_sql("BEGIN");
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(StorageError::from)?;
        let value = f(&tx).map_err(StorageError::from)?;
        tx.commit().map_err(StorageError::from)?;
        self.log_sql("COMMIT");
        Ok(value)
    }

    /// Gives `f` direct access to the underlying connection.
    ///
    /// Statements issued this way bypass diagnostic logging.
    ///
    /// # Errors
    ///
    /// Returns an error if `f` fails.
    pub fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.lock()?;
        Ok(f(&conn).map_err(StorageError::from)?)
    }

    /// Checks if a table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.query_row(TABLE_EXISTS_SQL, params![name], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Lists user tables in name order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn tables(&self) -> Result<Vec<String>> {
        self.query_all(LIST_TABLES_SQL, [], |row| row.get(0))
    }

    /// Returns the row count of a table described by the schema.
    ///
    /// Returns `None` for tables the schema does not describe or the file
    /// does not contain.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    pub fn row_count(&self, table: &str) -> Result<Option<u64>> {
        let Some(def) = self.schema.table(table) else {
            return Ok(None);
        };
        if !self.table_exists(def.name)? {
            return Ok(None);
        }
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", def.name);
        let count: i64 = self.query_row(&sql, [], |row| row.get(0))?;
        Ok(Some(count as u64))
    }

    /// Returns the recorded schema version, if tables were ever created
    /// through this crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn schema_version(&self) -> Result<Option<u32>> {
        if !self.table_exists(SCHEMA_INFO_TABLE)? {
            return Ok(None);
        }
        let version: Option<String> =
            self.query_opt(GET_INFO_SQL, params!["version"], |row| row.get(0))?;
        Ok(version.and_then(|v| v.parse().ok()))
    }

    /// Returns the database file size in bytes (None for in-memory).
    #[must_use]
    pub fn file_size(&self) -> Option<u64> {
        if self.location.is_in_memory() {
            return None;
        }
        std::fs::metadata(self.location.path()).ok().map(|m| m.len())
    }

    /// Closes the connection.
    ///
    /// Dropping the handle also closes it, but silently.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Close`] if `SQLite` reports an error on close.
    pub fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|e| StorageError::Close(format!("connection lock poisoned: {e}")))?;
        conn.close()
            .map_err(|(_, e)| StorageError::Close(e.to_string()))?;
        tracing::debug!(path = %self.location, "database closed");
        Ok(())
    }
}

impl<S: Schema> std::fmt::Debug for Database<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .field("schema", &self.schema.name())
            .field("logging", &self.logging)
            .finish_non_exhaustive()
    }
}
