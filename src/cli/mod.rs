//! CLI layer for authdb.
//!
//! Provides the command-line interface using clap, with commands for
//! initializing and inspecting the auth database.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
