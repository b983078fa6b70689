//! CLI command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{CacheCommand, Cli, ConfigCommand};
use crate::config::Settings;
use crate::fixtures::{self, EvalCase, EVAL_CASES, SAMPLES};
use crate::judge::{judge_summary, Evaluation};
use crate::llm::{Completer, CompletionCache, CompletionClient};
use crate::summary::{is_valid, MeetingAgent, MeetingSummary, SummaryOutcome};
use crate::APP_NAME;

/// Summarize a transcript from a file, stdin, or a built-in sample
pub async fn summarize_transcript(
    settings: &Settings,
    file: Option<PathBuf>,
    sample: Option<String>,
    json: bool,
    no_cache: bool,
) -> Result<()> {
    let completer = build_completer(settings, no_cache)?;

    let transcript = read_transcript(file.as_deref(), sample.as_deref())?;
    if transcript.trim().is_empty() {
        anyhow::bail!("Please enter a meeting transcript");
    }

    let agent = MeetingAgent::new(completer, &settings.prompts.template_path);
    let result = agent.summarize(&transcript).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        if !is_valid(&result) {
            anyhow::bail!("Agent returned invalid response structure");
        }
        return Ok(());
    }

    match SummaryOutcome::from_object(&result) {
        Some(SummaryOutcome::Summary(summary)) => {
            print!("{}", render_summary(&summary));
        }
        Some(SummaryOutcome::Error(code)) => {
            println!("{}: {}", code.as_str(), code.description());
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            anyhow::bail!("Agent returned invalid response structure");
        }
    }

    Ok(())
}

/// Run evaluation cases through the agent, the validator, and the judge
pub async fn run_eval(settings: &Settings, case: Option<String>, no_cache: bool) -> Result<()> {
    let cases: Vec<&EvalCase> = match case.as_deref() {
        Some(name) => vec![fixtures::find_case(name).with_context(|| {
            format!("Unknown evaluation case '{}'. Run `recap samples` to list cases", name)
        })?],
        None => EVAL_CASES.iter().collect(),
    };

    let completer = build_completer(settings, no_cache)?;
    let agent = MeetingAgent::new(completer.clone(), &settings.prompts.template_path);

    let mut passed = 0;
    for case in &cases {
        println!("{}", "=".repeat(60));
        println!("Case: {} ({})", case.name, case.description);
        println!("{}", "=".repeat(60));

        let result = match agent.summarize(case.transcript).await {
            Ok(result) => result,
            Err(e) => {
                println!("FAIL  summarizer error: {}", e);
                continue;
            }
        };

        println!("Agent summary: {}", serde_json::to_string(&result)?);

        if !is_valid(&result) {
            println!("FAIL  invalid response structure");
            continue;
        }

        let evaluation =
            judge_summary(completer.as_ref(), case.transcript, &result, &case.expectations())
                .await;
        print!("{}", render_evaluation(&evaluation));

        if evaluation.is_passing() {
            passed += 1;
        }
        println!();
    }

    println!("{} of {} cases passed", passed, cases.len());
    if passed < cases.len() {
        anyhow::bail!("{} evaluation case(s) failed", cases.len() - passed);
    }

    Ok(())
}

/// List built-in samples and evaluation cases
pub fn list_samples() {
    println!("Samples ({} summarize --sample <name>):", APP_NAME);
    for sample in SAMPLES {
        println!("  {:<18} {}", sample.name, sample.title);
    }

    println!();
    println!("Evaluation cases ({} eval --case <name>):", APP_NAME);
    for case in EVAL_CASES {
        println!("  {:<18} {}", case.name, truncate(case.description, 56));
    }
}

/// Handle cache subcommands
pub fn cache_command(settings: &Settings, cmd: CacheCommand) -> Result<()> {
    let cache = CompletionCache::new(settings.cache_dir());

    match cmd {
        CacheCommand::Path => {
            println!("{}", cache.dir().display());
        }
        CacheCommand::Stats => {
            let stats = cache
                .stats()
                .with_context(|| format!("Failed to read cache at {}", cache.dir().display()))?;
            println!("Cache: {}", cache.dir().display());
            println!("Shards: {}", stats.shards);
            println!("Entries: {}", stats.entries);
            if !settings.cache.enabled {
                println!("(caching is disabled in config)");
            }
        }
        CacheCommand::Clear => {
            let removed = cache
                .clear()
                .with_context(|| format!("Failed to clear cache at {}", cache.dir().display()))?;
            println!("Removed {} cache shard(s)", removed);
        }
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "<redacted>".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write a completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, command_name, out);
}

// Helper functions

fn build_completer(settings: &Settings, no_cache: bool) -> Result<Arc<dyn Completer>> {
    let client = CompletionClient::from_settings(settings)?;
    let client = if no_cache || !settings.cache.enabled {
        client.without_cache()
    } else {
        client
    };
    Ok(Arc::new(client))
}

fn read_transcript(file: Option<&Path>, sample: Option<&str>) -> Result<String> {
    if let Some(name) = sample {
        let sample = fixtures::find_sample(name).with_context(|| {
            format!("Unknown sample '{}'. Run `recap samples` to list samples", name)
        })?;
        return Ok(sample.transcript.to_string());
    }

    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript: {}", path.display())),
        _ => {
            let mut transcript = String::new();
            std::io::stdin()
                .read_to_string(&mut transcript)
                .context("Failed to read transcript from stdin")?;
            Ok(transcript)
        }
    }
}

fn render_summary(summary: &MeetingSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Title: {}\n", summary.meeting_title));
    output.push_str(&format!("Agenda: {}\n", summary.agenda));
    output.push('\n');

    if summary.action_items.is_empty() {
        output.push_str("No action items found in this meeting\n");
        return output;
    }

    output.push_str("Action Items:\n");
    for (idx, item) in summary.action_items.iter().enumerate() {
        output.push_str(&format!("  #{}: {}\n", idx + 1, item.task));
        output.push_str(&format!("      Owner: {}\n", item.owner));
        output.push_str(&format!("      Deadline: {}\n", item.deadline));
    }

    output
}

fn render_evaluation(evaluation: &Evaluation) -> String {
    let mut output = String::new();
    let verdict = if evaluation.is_passing() { "PASS" } else { "FAIL" };
    output.push_str(&format!("{}  score {}/100\n", verdict, evaluation.score));
    output.push_str(&format!("Feedback: {}\n", evaluation.feedback));

    for (criterion, score) in &evaluation.criteria_scores {
        output.push_str(&format!("  {:<28} {}\n", criterion, score));
    }

    if !evaluation.issues.is_empty() {
        output.push_str("Issues:\n");
        for issue in &evaluation.issues {
            output.push_str(&format!("  - {}\n", issue));
        }
    }

    output
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
