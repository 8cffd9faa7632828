//! Phrases command: inspect one document's distinct phrase set.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use phrasedup_core::config::Config;
use phrasedup_core::phrase;

use super::read_input_file;

/// Arguments for the `phrases` subcommand.
#[derive(Args, Debug)]
pub struct PhrasesArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Phrase window width in tokens.
    #[arg(long)]
    pub window: Option<usize>,

    /// Print the phrases themselves, sorted, instead of just the count.
    #[arg(long)]
    pub list: bool,
}

/// Extract a single document's phrase set and report its size or contents.
#[instrument(name = "cmd_phrases", skip_all, fields(file = %args.file))]
pub fn cmd_phrases(
    args: PhrasesArgs,
    global_json: bool,
    config: &Config,
    max_file_bytes: Option<u64>,
) -> anyhow::Result<()> {
    let window = args.window.unwrap_or(config.window_size);
    debug!(window, list = args.list, "executing phrases command");

    let content = read_input_file(&args.file, max_file_bytes)?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    let report = phrase::phrase_report(&lines, window, args.list)
        .with_context(|| format!("failed to extract phrases from {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(ref listed) = report.phrases {
        println!(
            "{} {} distinct phrase(s) of {} word(s) from {} token(s)",
            args.file.bold(),
            report.distinct,
            report.window,
            report.tokens,
        );
        for phrase in listed {
            println!("  {phrase}");
        }
    } else {
        println!("{}", report.distinct);
    }

    Ok(())
}
