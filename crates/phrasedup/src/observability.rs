//! Logging and tracing bootstrap.
//!
//! Events always go to stderr through an [`EnvFilter`] assembled from the
//! CLI flags, the config file, and `RUST_LOG`. When a log path or directory
//! is configured, a second non-ANSI layer appends to that file through a
//! non-blocking writer; the returned guard must stay alive for the process
//! so buffered events flush on exit.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// File-logging destinations, resolved from environment and config.
#[derive(Debug, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (`PHRASEDUP_LOG_PATH`). Wins over `log_dir`.
    pub log_path: Option<PathBuf>,
    /// Log directory (`PHRASEDUP_LOG_DIR`, falling back to the config file's
    /// `log_dir`). The file inside it is `phrasedup.log`.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve destinations: environment variables first, then the config
    /// file's `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        let log_path = std::env::var_os("PHRASEDUP_LOG_PATH").map(PathBuf::from);
        let log_dir = std::env::var_os("PHRASEDUP_LOG_DIR")
            .map(PathBuf::from)
            .or(config_log_dir);
        Self { log_path, log_dir }
    }

    /// The file events should append to, if file logging is wanted at all.
    fn target_file(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| self.log_dir.as_ref().map(|dir| dir.join("phrasedup.log")))
    }
}

/// Build the event filter from CLI verbosity flags and the configured level.
///
/// `RUST_LOG` wins when set; otherwise `--quiet` forces errors only and each
/// `-v` steps the default up (debug, then trace).
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose, config_level)))
}

/// The fallback filter directive when `RUST_LOG` is not set.
fn default_directive(quiet: bool, verbose: u8, config_level: &str) -> &str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Install the global subscriber.
///
/// Returns the non-blocking writer's guard when a file layer is active;
/// hold it for the life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.target_file() {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}
