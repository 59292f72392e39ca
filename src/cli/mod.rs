//! CLI module
//!
//! This module provides the command-line interface for airtable-openapi:
//! argument definitions and the subcommand handlers.

pub mod args;
pub mod commands;

// Re-exports
pub use args::{Cli, Commands};
pub use commands::{exit_code, format_error, run};
