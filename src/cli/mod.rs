//! CLI module for bookshelf
//!
//! Provides command-line interface for:
//! - serve: Start the books REST API server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
