//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Result of the `init` command.
#[derive(Debug, Clone, Serialize)]
pub struct InitReport {
    /// Database file path.
    pub path: String,
    /// Containing directory.
    pub directory: String,
    /// Schema name.
    pub schema: String,
    /// Recorded schema version.
    pub schema_version: Option<u32>,
    /// Whether SQL diagnostic logging is enabled.
    pub logging: bool,
    /// Tables present after initialization.
    pub tables: Vec<String>,
}

/// Per-table status.
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    /// Table name.
    pub name: String,
    /// Row count, `None` if the table is missing.
    pub rows: Option<u64>,
}

/// Result of the `status` command.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Database file path.
    pub path: String,
    /// Schema name.
    pub schema: String,
    /// Recorded schema version.
    pub schema_version: Option<u32>,
    /// Whether SQL diagnostic logging is enabled.
    pub logging: bool,
    /// Schema tables with row counts.
    pub tables: Vec<TableStatus>,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}

#[derive(Serialize)]
struct PathOutput<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct ErrorOutput {
    error: String,
}

/// Formats an `init` result.
#[must_use]
pub fn format_init(report: &InitReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Initialized auth database at {}", report.path);
            let _ = writeln!(output, "  Directory:  {}", report.directory);
            let _ = writeln!(output, "  Tables:     {}", report.tables.join(", "));
            let _ = writeln!(
                output,
                "  Logging:    {}",
                if report.logging { "enabled" } else { "disabled" }
            );
            output
        }
        OutputFormat::Json => format_json(report),
    }
}

/// Formats a `status` result.
#[must_use]
pub fn format_status(report: &StatusReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_status_text(report),
        OutputFormat::Json => format_json(report),
    }
}

fn format_status_text(report: &StatusReport) -> String {
    let mut output = String::new();
    output.push_str("authdb Status\n");
    output.push_str("=============\n\n");
    let _ = writeln!(output, "  Path:          {}", report.path);
    let _ = write!(output, "  Schema:        {}", report.schema);
    if let Some(version) = report.schema_version {
        let _ = write!(output, " v{version}");
    }
    output.push('\n');
    let _ = writeln!(
        output,
        "  Logging:       {}",
        if report.logging { "enabled" } else { "disabled" }
    );
    if let Some(size) = report.db_size {
        let _ = writeln!(output, "  DB size:       {}", format_size(size));
    }
    output.push_str("\n  Tables:\n");
    for table in &report.tables {
        match table.rows {
            Some(rows) => {
                let _ = writeln!(output, "    {:<16} {rows:>8} rows", table.name);
            }
            None => {
                let _ = writeln!(output, "    {:<16} {:>8}", table.name, "missing");
            }
        }
    }
    output
}

/// Formats the resolved path.
#[must_use]
pub fn format_path(path: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{path}\n"),
        OutputFormat::Json => format_json(&PathOutput { path }),
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&ErrorOutput {
            error: error.to_string(),
        }),
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a byte size as human-readable.
#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
