//! CLI command implementations.
//!
//! Contains the logic for each CLI command.

use crate::cli::output::{
    InitReport, OutputFormat, StatusReport, TableStatus, format_init, format_path, format_status,
};
use crate::cli::parser::{Cli, Commands};
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::init::initialize;
use crate::storage::Schema;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let config = cli.database_config();

    match &cli.command {
        Commands::Init => cmd_init(&config, format),
        Commands::Status => cmd_status(&config, format),
        Commands::Path => Ok(cmd_path(&config, format)),
    }
}

// ==================== Command Implementations ====================

fn cmd_init(config: &DatabaseConfig, format: OutputFormat) -> Result<String> {
    let db = initialize(config)?;
    db.create_tables()?;

    let report = InitReport {
        path: db.location().to_string(),
        directory: db.location().directory().display().to_string(),
        schema: db.schema().name().to_string(),
        schema_version: db.schema_version()?,
        logging: db.logging_enabled(),
        tables: db.tables()?,
    };
    db.close()?;

    Ok(format_init(&report, format))
}

fn cmd_status(config: &DatabaseConfig, format: OutputFormat) -> Result<String> {
    let db = initialize(config)?;

    let mut tables = Vec::with_capacity(db.schema().tables().len());
    for table in db.schema().tables() {
        tables.push(TableStatus {
            name: table.name.to_string(),
            rows: db.row_count(table.name)?,
        });
    }

    let report = StatusReport {
        path: db.location().to_string(),
        schema: db.schema().name().to_string(),
        schema_version: db.schema_version()?,
        logging: db.logging_enabled(),
        tables,
        db_size: db.file_size(),
    };
    db.close()?;

    Ok(format_status(&report, format))
}

fn cmd_path(config: &DatabaseConfig, format: OutputFormat) -> String {
    let location = config.storage_location();
    format_path(&location.to_string(), format)
}
