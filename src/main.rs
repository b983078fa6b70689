//! recap - Meeting transcript summaries with action items
//!
//! Entry point for the recap CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recap::cli::{Cli, Commands};
use recap::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            recap::cli::commands::write_completions(shell, &mut std::io::stdout());
        }
        Commands::Samples => {
            recap::cli::commands::list_samples();
        }
        Commands::Summarize {
            file,
            sample,
            json,
            no_cache,
        } => {
            let settings = Settings::load()?;
            recap::cli::commands::summarize_transcript(&settings, file, sample, json, no_cache)
                .await?;
        }
        Commands::Eval { case, no_cache } => {
            let settings = Settings::load()?;
            recap::cli::commands::run_eval(&settings, case, no_cache).await?;
        }
        Commands::Cache(cache_cmd) => {
            let settings = Settings::load()?;
            recap::cli::commands::cache_command(&settings, cache_cmd)?;
        }
        Commands::Config(config_cmd) => {
            let settings = Settings::load()?;
            recap::cli::commands::config_command(&settings, config_cmd)?;
        }
    }

    Ok(())
}
