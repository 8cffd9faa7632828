//! Document sources.
//!
//! A corpus is an ordered list of named documents plus the ability to read
//! each one's raw lines. The comparator only sees this interface; the
//! production implementation is a flat filesystem directory.

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{DetectError, DetectResult};

/// An ordered collection of named documents.
pub trait DocumentSource {
    /// List document names in corpus order.
    ///
    /// The order is the enumeration order: it fixes pair-key direction
    /// (`first-second`) for the whole run, so it must be deterministic.
    ///
    /// # Errors
    ///
    /// Fails when the collection cannot be enumerated at all. This is the
    /// precondition-violation case; the run aborts with no result.
    fn list(&self) -> DetectResult<Vec<String>>;

    /// Read the raw lines of one document.
    ///
    /// # Errors
    ///
    /// Any single read failure aborts the whole run; there is no
    /// skip-and-continue mode.
    fn read_lines(&self, name: &str) -> DetectResult<Vec<String>>;
}

/// Filesystem-backed document source.
///
/// Lists the regular files directly inside `root` (no recursion), sorted by
/// name so corpus order is stable across platforms and runs. Entries with
/// non-UTF-8 names are skipped. Optional include/exclude globs filter the
/// listing; an optional size limit guards against oversized documents.
#[derive(Debug)]
pub struct DirectorySource {
    root: Utf8PathBuf,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
    max_file_bytes: Option<u64>,
}

impl DirectorySource {
    /// Create a source over `root` with no filters and no size limit.
    pub fn new<P: AsRef<Utf8Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            include: None,
            exclude: None,
            max_file_bytes: None,
        }
    }

    /// Restrict the listing to names matching any of `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidGlob`] for a pattern that does not
    /// compile.
    pub fn with_include(mut self, patterns: &[String]) -> DetectResult<Self> {
        self.include = Some(build_globset(patterns)?);
        Ok(self)
    }

    /// Skip names matching any of `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidGlob`] for a pattern that does not
    /// compile.
    pub fn with_exclude(mut self, patterns: &[String]) -> DetectResult<Self> {
        self.exclude = Some(build_globset(patterns)?);
        Ok(self)
    }

    /// Refuse documents larger than `bytes` (`None` disables the check).
    pub const fn with_max_file_bytes(mut self, bytes: Option<u64>) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    /// The corpus directory.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn keeps(&self, name: &str) -> bool {
        if let Some(ref include) = self.include
            && !include.is_match(name)
        {
            return false;
        }
        if let Some(ref exclude) = self.exclude
            && exclude.is_match(name)
        {
            return false;
        }
        true
    }
}

impl DocumentSource for DirectorySource {
    #[tracing::instrument(skip_all, fields(root = %self.root))]
    fn list(&self) -> DetectResult<Vec<String>> {
        let entries =
            std::fs::read_dir(self.root.as_std_path()).map_err(|e| DetectError::InvalidDirectory {
                path: self.root.clone(),
                source: e,
            })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DetectError::InvalidDirectory {
                path: self.root.clone(),
                source: e,
            })?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if self.keeps(&name) {
                names.push(name);
            }
        }

        names.sort();
        tracing::debug!(documents = names.len(), "directory listed");
        Ok(names)
    }

    fn read_lines(&self, name: &str) -> DetectResult<Vec<String>> {
        let path = self.root.join(name);

        // Preflight the size via metadata before reading into memory.
        if let Some(limit) = self.max_file_bytes {
            let metadata =
                std::fs::metadata(path.as_std_path()).map_err(|e| DetectError::ReadDocument {
                    name: name.to_string(),
                    source: e,
                })?;
            if metadata.len() > limit {
                return Err(DetectError::DocumentTooLarge {
                    name: name.to_string(),
                    size: metadata.len(),
                    limit,
                });
            }
        }

        let content =
            std::fs::read_to_string(path.as_std_path()).map_err(|e| DetectError::ReadDocument {
                name: name.to_string(),
                source: e,
            })?;
        Ok(content.lines().map(str::to_string).collect())
    }
}

fn build_globset(patterns: &[String]) -> DetectResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| DetectError::InvalidGlob {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| DetectError::InvalidGlob {
        pattern: patterns.join(", "),
        source: e,
    })
}
