// airtable-openapi: read-only OpenAPI schemas for Airtable bases
//
// This is the main entry point for the airtable-openapi application.

use airtable_openapi::cli::{self, Cli};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose only raises the default level.
    // Logs go to stderr so stdout carries only the document.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", cli::format_error(&e));
            ExitCode::from(cli::exit_code(&e))
        }
    }
}
