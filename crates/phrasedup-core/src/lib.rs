//! Core library for phrasedup.
//!
//! This crate implements the phrase-overlap detection pipeline used by the
//! `phrasedup` CLI and any downstream consumers: tokenization, windowed
//! phrase extraction, pairwise match counting, and ranking, plus the
//! configuration layer and small report-writing utilities.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading and management
//! - [`corpus`] - Document sources (directory listing, file reading)
//! - [`tokenize`], [`phrase`], [`matching`], [`rank`] - The pipeline stages
//! - [`detect`] - The corpus comparator tying the stages together
//! - [`cache`] - Run-scoped phrase-set memoization
//! - [`capacity`], [`sink`] - Standalone utilities
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use phrasedup_core::{Detector, DirectorySource};
//!
//! let source = DirectorySource::new("corpus/");
//! let report = Detector::new(6, 0)
//!     .detect(&source)
//!     .expect("Failed to scan corpus");
//!
//! for pair in &report.matches {
//!     println!("{}: {}", pair.pair, pair.matches);
//! }
//! ```
#![deny(unsafe_code)]

pub mod cache;

pub mod capacity;

pub mod config;

pub mod corpus;

pub mod detect;

pub mod error;

pub mod matching;

pub mod phrase;

pub mod rank;

pub mod sink;

pub mod tokenize;

/// Default per-document size limit (5 MiB), shared by CLI and library users.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub use config::{Config, ConfigLoader, LogLevel};

pub use corpus::{DirectorySource, DocumentSource};

pub use detect::{Detector, ExtractionPolicy, ScanReport, detect_in_directory};

pub use error::{ConfigError, ConfigResult, DetectError, DetectResult};

pub use rank::PairMatch;
