//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

pub mod info;
pub mod phrases;
pub mod scan;

/// Read a file and validate its size against the configured limit.
///
/// Combines the file-read and size-validation steps that file-oriented
/// commands need: the size comes from metadata before the content is pulled
/// into memory.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<u64>) -> anyhow::Result<String> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len();
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}
