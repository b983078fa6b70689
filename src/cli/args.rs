//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// recap - Meeting transcript summaries with action items
#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a meeting transcript
    Summarize {
        /// Transcript file ("-" or omitted reads stdin)
        #[arg(conflicts_with = "sample")]
        file: Option<PathBuf>,

        /// Use a built-in sample transcript instead (see `recap samples`)
        #[arg(short, long)]
        sample: Option<String>,

        /// Print the raw JSON object instead of a formatted summary
        #[arg(long)]
        json: bool,

        /// Skip the completion cache
        #[arg(long)]
        no_cache: bool,
    },

    /// Run the built-in evaluation cases through the summarizer and the judge
    Eval {
        /// Run a single case by name
        #[arg(short, long)]
        case: Option<String>,

        /// Skip the completion cache
        #[arg(long)]
        no_cache: bool,
    },

    /// List built-in sample transcripts and evaluation cases
    Samples,

    /// Completion cache management
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Show the cache directory
    Path,

    /// Count cached completions
    Stats,

    /// Delete every cached completion
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summarize_rejects_file_and_sample_together() {
        let parsed = Cli::try_parse_from(["recap", "summarize", "notes.txt", "--sample", "standup"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn summarize_parses_sample_and_flags() {
        let cli = Cli::try_parse_from(["recap", "summarize", "--sample", "standup", "--json"])
            .expect("arguments should parse");
        match cli.command {
            Commands::Summarize {
                file,
                sample,
                json,
                no_cache,
            } => {
                assert!(file.is_none());
                assert_eq!(sample.as_deref(), Some("standup"));
                assert!(json);
                assert!(!no_cache);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
