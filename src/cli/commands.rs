//! Command handlers for CLI
//!
//! This module implements the subcommands: load a base from a source,
//! translate it, and write the document and notices.

use crate::base::schema::{Base, BaseOverrides};
use crate::base::source::{BaseSource, FileSource, MetaApiSource};
use crate::cli::args::{BaseArgs, Cli, Commands, ConfigAction, OutputArgs};
use crate::config::{Config, Settings};
use crate::error::{GeneratorError, Result};
use crate::openapi::translator::{translate_base, Translation};
use crate::report;
use std::fs;

impl From<&BaseArgs> for BaseOverrides {
    fn from(args: &BaseArgs) -> Self {
        Self {
            id: args.base_id.clone(),
            name: args.base_name.clone(),
        }
    }
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            input,
            base,
            output,
        } => {
            let source = FileSource::new(input, BaseOverrides::from(&base));
            generate(&settings, &source, &output).await
        }
        Commands::Fetch {
            base,
            token,
            output,
        } => {
            let base_id = base.base_id.clone().ok_or_else(|| {
                GeneratorError::missing_base("fetch requires --base-id")
            })?;
            let token = settings.token(token.as_deref())?;
            let source = MetaApiSource::new(token, base_id, base.base_name.clone())?
                .with_meta_api_url(settings.config.meta_api_url.clone());
            generate(&settings, &source, &output).await
        }
        Commands::Config { action } => {
            let message = handle_config(&settings, &action)?;
            println!("{}", message);
            Ok(())
        }
    }
}

/// Load, translate and write
pub async fn generate(
    settings: &Settings,
    source: &dyn BaseSource,
    output: &OutputArgs,
) -> Result<()> {
    tracing::info!(source = %source.source_name(), "loading base");
    let base = source.load().await?;

    let translation = translate(settings, &base, output)?;
    let rendered = render(settings, &translation, output)?;

    match &output.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            tracing::info!(path = %path.display(), "schema written");
        }
        None => println!("{}", rendered),
    }

    // The Markdown notice already contains the warnings
    if !output.markdown {
        if let Some(notice) = report::render_warnings(&translation.warnings) {
            eprintln!("{}", notice);
        }
    }

    if output.summary {
        eprintln!("{}", report::render_summary(&translation));
    }

    Ok(())
}

/// Translate `base` with the configured options and any CLI overrides
pub fn translate(settings: &Settings, base: &Base, output: &OutputArgs) -> Result<Translation> {
    let mut options = settings.document_options();
    if let Some(policy) = output.collision_policy {
        options.collision_policy = policy;
    }
    translate_base(base, &options)
}

/// Text to emit for `translation` according to the output flags
pub fn render(settings: &Settings, translation: &Translation, output: &OutputArgs) -> Result<String> {
    if output.markdown {
        return report::render_markdown(translation);
    }
    let pretty = settings.config.pretty && !output.compact;
    report::render_document(translation, pretty)
}

/// Handle a `config` subcommand and return the message to print
pub fn handle_config(settings: &Settings, action: &ConfigAction) -> Result<String> {
    match action {
        ConfigAction::Init { force } => {
            if settings.config_path.exists() && !force {
                return Err(GeneratorError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    settings.config_path.display()
                )));
            }
            let fresh = Settings {
                config: Config::default(),
                config_path: settings.config_path.clone(),
            };
            fresh.save()?;
            Ok(format!(
                "✓ Wrote default configuration to {}",
                settings.config_path.display()
            ))
        }
        ConfigAction::Show => {
            let body = toml::to_string_pretty(&settings.config)?;
            Ok(format!("# {}\n{}", settings.config_path.display(), body))
        }
    }
}

/// Format an error for display
pub fn format_error(error: &GeneratorError) -> String {
    format!("Error: {}", error)
}

/// Process exit code for a failed run: 2 for bad input or configuration, 1 otherwise
pub fn exit_code(error: &GeneratorError) -> u8 {
    if error.is_input_error() {
        2
    } else {
        1
    }
}
