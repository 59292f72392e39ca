//! CLI argument definitions using clap
//!
//! - airtable-openapi generate -i base.json     # translate a local description
//! - airtable-openapi fetch --base-id appXXXX   # read it from the metadata API
//! - airtable-openapi config init|show          # manage the config file

use crate::openapi::naming::CollisionPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "airtable-openapi")]
#[command(about = "Generate a read-only OpenAPI 3.1 schema for an Airtable base")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a base description read from a JSON file or stdin
    Generate {
        /// Input file, or '-' for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        #[command(flatten)]
        base: BaseArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Fetch the base description from the Airtable metadata API
    Fetch {
        #[command(flatten)]
        base: BaseArgs,

        /// Personal access token (defaults to the configured env variable)
        #[arg(long)]
        token: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// Base identity overrides
#[derive(Args, Debug, Clone, Default)]
pub struct BaseArgs {
    /// Base id used in endpoint paths
    #[arg(long)]
    pub base_id: Option<String>,

    /// Base name used in the document title
    #[arg(long)]
    pub base_name: Option<String>,
}

/// Where and how to write the result
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long, conflicts_with = "markdown")]
    pub compact: bool,

    /// Emit the Markdown notice (heading, instructions, fenced JSON, warnings)
    #[arg(long)]
    pub markdown: bool,

    /// Print a table of generated endpoints to stderr
    #[arg(long)]
    pub summary: bool,

    /// Override the configured collision policy
    #[arg(long)]
    pub collision_policy: Option<CollisionPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "airtable-openapi",
            "generate",
            "-i",
            "base.json",
            "--base-id",
            "appX",
            "--compact",
            "--collision-policy",
            "fail",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                input,
                base,
                output,
            } => {
                assert_eq!(input, PathBuf::from("base.json"));
                assert_eq!(base.base_id.as_deref(), Some("appX"));
                assert!(output.compact);
                assert_eq!(output.collision_policy, Some(CollisionPolicy::Fail));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_generate_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["airtable-openapi", "generate"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Generate { ref input, .. } if input == &PathBuf::from("-")
        ));
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["airtable-openapi", "--verbose", "config", "init", "--force"])
            .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }

    #[test]
    fn test_compact_conflicts_with_markdown() {
        let result = Cli::try_parse_from(["airtable-openapi", "generate", "--compact", "--markdown"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = Cli::try_parse_from([
            "airtable-openapi",
            "generate",
            "--collision-policy",
            "rename",
        ]);
        assert!(result.is_err());
    }
}
