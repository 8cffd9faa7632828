//! Scan command: detect cross-document phrase overlap in a directory.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use phrasedup_core::config::Config;
use phrasedup_core::corpus::DirectorySource;
use phrasedup_core::detect::{Detector, ExtractionPolicy};
use phrasedup_core::sink::{self, FileSink};

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory containing the corpus.
    pub dir: Utf8PathBuf,

    /// Phrase window width in tokens.
    #[arg(long)]
    pub window: Option<usize>,

    /// Match count a pair must strictly exceed to be reported.
    #[arg(long)]
    pub threshold: Option<usize>,

    /// How phrase sets are obtained during the pair loop.
    #[arg(long, value_enum)]
    pub extraction: Option<ExtractionPolicy>,

    /// Also write the JSON report to FILE.
    #[arg(long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
}

/// Compare every document pair in a directory and report ranked overlap.
#[instrument(name = "cmd_scan", skip_all, fields(dir = %args.dir))]
pub fn cmd_scan(
    args: ScanArgs,
    global_json: bool,
    config: &Config,
    max_file_bytes: Option<u64>,
) -> anyhow::Result<()> {
    let window = args.window.unwrap_or(config.window_size);
    let threshold = args.threshold.unwrap_or(config.threshold);
    let policy = args.extraction.unwrap_or(config.extraction);
    debug!(window, threshold, policy = %policy, "executing scan command");

    let mut source = DirectorySource::new(&args.dir).with_max_file_bytes(max_file_bytes);
    if let Some(ref include) = config.include {
        source = source
            .with_include(include)
            .context("invalid include pattern in config")?;
    }
    if let Some(ref exclude) = config.exclude {
        source = source
            .with_exclude(exclude)
            .context("invalid exclude pattern in config")?;
    }

    let spinner = (!global_json).then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_message("comparing documents");
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let outcome = Detector::new(window, threshold)
        .with_policy(policy)
        .detect(&source);

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let report = outcome.with_context(|| format!("failed to scan {}", args.dir))?;

    if let Some(ref path) = args.output {
        let payload = serde_json::to_vec_pretty(&report)?;
        let written = sink::write_report(&FileSink::new(path), &payload)
            .with_context(|| format!("failed to write report to {path}"))?;
        debug!(bytes = written, path = %path, "report written");
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Text output
    println!(
        "{} ({} documents, {} pairs compared)",
        args.dir.bold(),
        report.documents,
        report.pairs_compared,
    );
    if report.matches.is_empty() {
        println!(
            "{} no pair shares more than {} phrase(s)",
            "CLEAN:".green(),
            report.threshold,
        );
    } else {
        for pair in &report.matches {
            println!("  {:>8}  {}", pair.matches.to_string().bold(), pair.pair);
        }
        println!(
            "{} {} pair(s) share more than {} phrase(s) of {} word(s)",
            "MATCH:".yellow(),
            report.matches.len(),
            report.threshold,
            report.window,
        );
    }

    Ok(())
}
