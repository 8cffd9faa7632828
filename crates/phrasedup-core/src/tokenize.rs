//! Token normalization.
//!
//! Converts raw document lines into the token stream the phrase extractor
//! consumes: lines split on single-space boundaries, every character outside
//! `A-Za-z` removed, the remainder uppercased.

/// Normalize one raw segment into a token.
///
/// Strips every non-ASCII-letter character and uppercases what is left. A
/// segment with no letters at all (punctuation, digits) normalizes to the
/// empty string, which is still a valid token.
pub fn normalize_token(segment: &str) -> String {
    segment
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Tokenize a single line.
///
/// Splits on single spaces only: runs of spaces yield empty segments, which
/// are kept as empty tokens, and other whitespace (tabs, etc.) is not a
/// boundary. Never fails for any printable input.
pub fn tokenize_line(line: &str) -> Vec<String> {
    line.split(' ').map(normalize_token).collect()
}

/// Tokenize a whole document, concatenating tokens across lines in order.
#[tracing::instrument(skip_all, fields(line_count = lines.len()))]
pub fn tokenize(lines: &[String]) -> Vec<String> {
    lines.iter().flat_map(|line| tokenize_line(line)).collect()
}
