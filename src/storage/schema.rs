//! Database schema definitions.
//!
//! Contains the auth store tables and the bookkeeping SQL used to record
//! which schema a database file was created with.

use crate::storage::traits::{Schema, TableDefinition};

/// Current schema version.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Name recorded for the auth schema.
pub const AUTH_SCHEMA_NAME: &str = "auth";

/// Name of the schema bookkeeping table.
pub const SCHEMA_INFO_TABLE: &str = "schema_info";

/// SQL for the schema bookkeeping table.
pub const SCHEMA_INFO_SQL: &str = r"
CREATE TABLE IF NOT EXISTS schema_info (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// SQL to get a recorded schema value.
pub const GET_INFO_SQL: &str = r"
SELECT value FROM schema_info WHERE key = ?;
";

/// SQL to set a recorded schema value.
pub const SET_INFO_SQL: &str = r"
INSERT OR REPLACE INTO schema_info (key, value) VALUES (?, ?);
";

/// SQL listing user tables.
pub const LIST_TABLES_SQL: &str = r"
SELECT name FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
ORDER BY name;
";

/// SQL to check whether a table exists.
pub const TABLE_EXISTS_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?;
";

// Timestamps are unix epoch milliseconds; booleans are 0/1 integers.

const USER_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS user (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    email_verified INTEGER NOT NULL DEFAULT 0,
    image TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
";

const SESSION_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS session (
    id TEXT PRIMARY KEY NOT NULL,
    expires_at INTEGER NOT NULL,
    token TEXT NOT NULL UNIQUE,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    ip_address TEXT,
    user_agent TEXT,
    user_id TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES user(id) ON DELETE CASCADE
);
";

const ACCOUNT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS account (
    id TEXT PRIMARY KEY NOT NULL,
    account_id TEXT NOT NULL,
    provider_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    access_token TEXT,
    refresh_token TEXT,
    id_token TEXT,
    access_token_expires_at INTEGER,
    refresh_token_expires_at INTEGER,
    scope TEXT,
    password TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    FOREIGN KEY (user_id) REFERENCES user(id) ON DELETE CASCADE
);
";

const VERIFICATION_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS verification (
    id TEXT PRIMARY KEY NOT NULL,
    identifier TEXT NOT NULL,
    value TEXT NOT NULL,
    expires_at INTEGER NOT NULL,
    created_at INTEGER,
    updated_at INTEGER
);
";

/// Auth store tables, referenced tables first.
pub const AUTH_TABLES: &[TableDefinition] = &[
    TableDefinition {
        name: "user",
        create_sql: USER_TABLE,
        indexes: &[],
    },
    TableDefinition {
        name: "session",
        create_sql: SESSION_TABLE,
        indexes: &["CREATE INDEX IF NOT EXISTS idx_session_user_id ON session(user_id)"],
    },
    TableDefinition {
        name: "account",
        create_sql: ACCOUNT_TABLE,
        indexes: &[
            "CREATE INDEX IF NOT EXISTS idx_account_user_id ON account(user_id)",
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_account_provider ON account(provider_id, account_id)",
        ],
    },
    TableDefinition {
        name: "verification",
        create_sql: VERIFICATION_TABLE,
        indexes: &[
            "CREATE INDEX IF NOT EXISTS idx_verification_identifier ON verification(identifier)",
        ],
    },
];

/// Schema description of the auth store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthSchema;

impl Schema for AuthSchema {
    fn name(&self) -> &'static str {
        AUTH_SCHEMA_NAME
    }

    fn version(&self) -> u32 {
        CURRENT_SCHEMA_VERSION
    }

    fn tables(&self) -> &'static [TableDefinition] {
        AUTH_TABLES
    }
}
