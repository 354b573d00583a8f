//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::DatabaseConfig;
use clap::{Parser, Subcommand};

/// authdb: bootstrap and inspect the local auth database.
#[derive(Parser, Debug)]
#[command(name = "authdb")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the auth database file.
    ///
    /// Blank values fall back to `dev_db/auth.db` in the current directory.
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub db_url: Option<String>,

    /// SQL diagnostic logging; only the exact value `true` enables it.
    #[arg(long, env = "DATABASE_LOGGING", global = true)]
    pub db_logging: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the auth database.
    ///
    /// Creates the directory, database file and tables if they don't exist.
    Init,

    /// Show database status (tables and row counts).
    Status,

    /// Print the resolved database path without touching the filesystem.
    Path,
}

impl Cli {
    /// Builds the database configuration from the parsed options.
    #[must_use]
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.db_url.clone(), self.db_logging.as_deref())
    }
}
