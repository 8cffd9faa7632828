//! Error types for phrasedup-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during a detection run.
///
/// Any variant aborts the whole run: there is no partial-result or
/// degrade-gracefully mode. Callers get either a complete ranked report
/// or one of these.
#[derive(Error, Debug)]
pub enum DetectError {
    /// The phrase window is smaller than one token.
    #[error("phrase window must be at least 1 (got {window})")]
    InvalidWindow {
        /// The rejected window width.
        window: usize,
    },

    /// The corpus directory could not be listed.
    ///
    /// This is the precondition-violation case: the caller handed us a path
    /// that is not an enumerable corpus.
    #[error("cannot list corpus directory {path}")]
    InvalidDirectory {
        /// The path that could not be listed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document could not be read.
    #[error("failed to read document {name}")]
    ReadDocument {
        /// Name of the unreadable document.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A document exceeded the configured size limit.
    #[error("document {name} is {size} bytes (limit: {limit} bytes)")]
    DocumentTooLarge {
        /// Name of the oversized document.
        name: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// An include/exclude pattern did not compile.
    #[error("invalid glob pattern {pattern:?}")]
    InvalidGlob {
        /// The offending pattern.
        pattern: String,
        /// The underlying globset error.
        #[source]
        source: globset::Error,
    },

    /// A phrase set was required for a comparison but was absent.
    ///
    /// Distinct from a legitimate zero-match count: zero means the documents
    /// share nothing, this means the comparison could not be performed.
    #[error("no phrase set available for document {name}")]
    MissingPhrases {
        /// Name of the document whose phrases were missing.
        name: String,
    },
}

/// Result type alias using [`DetectError`].
pub type DetectResult<T> = Result<T, DetectError>;
