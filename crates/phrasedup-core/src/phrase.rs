//! Windowed phrase extraction.
//!
//! Slides a fixed-width window over a document's token sequence and collects
//! the distinct space-joined phrases. The comparator treats each phrase as an
//! opaque string; everything interesting about a document is its phrase set.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DetectError, DetectResult};
use crate::tokenize;

/// The distinct phrases of one document.
pub type PhraseSet = HashSet<String>;

/// Extract the set of distinct `window`-token phrases from a token sequence.
///
/// The window advances one token at a time; each phrase is the space-joined
/// window content. Repeats within the document collapse to one entry.
/// Rather than re-joining the full window on every step, the current phrase
/// string slides: drop the leading word, append the next.
///
/// # Errors
///
/// Returns [`DetectError::InvalidWindow`] when `window` is zero. A sequence
/// shorter than `window` is not an error; it yields an empty set.
#[tracing::instrument(skip(tokens), fields(token_count = tokens.len(), window))]
pub fn extract_phrases(tokens: &[String], window: usize) -> DetectResult<PhraseSet> {
    if window < 1 {
        return Err(DetectError::InvalidWindow { window });
    }

    let mut phrases = PhraseSet::new();
    if tokens.len() < window {
        return Ok(phrases);
    }

    let mut phrase = tokens[..window].join(" ");
    let last = tokens.len() - window;
    for i in 0..last {
        phrases.insert(phrase.clone());
        slide(&mut phrase, &tokens[i + window]);
    }
    phrases.insert(phrase);

    Ok(phrases)
}

/// Advance `phrase` by one token: drop the leading word, append `next`.
///
/// A window of one has no interior space, so the whole content is replaced.
fn slide(phrase: &mut String, next: &str) {
    match phrase.find(' ') {
        Some(cut) => {
            phrase.drain(..=cut);
            phrase.push(' ');
            phrase.push_str(next);
        }
        None => {
            phrase.clear();
            phrase.push_str(next);
        }
    }
}

/// Summary of one document's distinct phrases.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PhraseReport {
    /// Phrase window width used.
    pub window: usize,
    /// Number of tokens in the document.
    pub tokens: usize,
    /// Number of distinct phrases.
    pub distinct: usize,
    /// The phrases themselves, sorted, when listing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrases: Option<Vec<String>>,
}

/// Build a [`PhraseReport`] for a document's raw lines.
///
/// # Errors
///
/// Returns [`DetectError::InvalidWindow`] when `window` is zero.
#[tracing::instrument(skip(lines), fields(line_count = lines.len(), window, list))]
pub fn phrase_report(lines: &[String], window: usize, list: bool) -> DetectResult<PhraseReport> {
    let tokens = tokenize::tokenize(lines);
    let set = extract_phrases(&tokens, window)?;
    let distinct = set.len();
    let phrases = list.then(|| {
        let mut sorted: Vec<String> = set.into_iter().collect();
        sorted.sort();
        sorted
    });

    Ok(PhraseReport {
        window,
        tokens: tokens.len(),
        distinct,
        phrases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &[&str]) -> Vec<String> {
        s.iter().map(|t| (*t).to_string()).collect()
    }

    /// Reference builder: every window joined from scratch. The sliding
    /// production path must always agree with this.
    fn rebuilt_phrases(tokens: &[String], window: usize) -> PhraseSet {
        tokens.windows(window).map(|w| w.join(" ")).collect()
    }

    #[test]
    fn zero_window_is_an_error() {
        let result = extract_phrases(&tokens(&["A", "B"]), 0);
        assert!(matches!(result, Err(DetectError::InvalidWindow { window: 0 })));
    }

    #[test]
    fn fewer_tokens_than_window_yields_empty_set() {
        let set = extract_phrases(&tokens(&["THE", "CAT"]), 3).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn basic_windows() {
        let set = extract_phrases(&tokens(&["THE", "CAT", "SAT"]), 2).unwrap();
        let expected: PhraseSet = ["THE CAT", "CAT SAT"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn window_of_one_treats_each_token_as_a_phrase() {
        let set = extract_phrases(&tokens(&["THE", "CAT", "THE"]), 1).unwrap();
        let expected: PhraseSet = ["THE", "CAT"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn repeated_phrases_collapse() {
        let set = extract_phrases(&tokens(&["A", "B", "A", "B", "A"]), 2).unwrap();
        let expected: PhraseSet = ["A B", "B A"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn empty_tokens_are_valid_phrase_components() {
        // Punctuation-only words normalize to empty tokens; they still occupy
        // window slots.
        let set = extract_phrases(&tokens(&["THE", "", "CAT"]), 2).unwrap();
        let expected: PhraseSet = ["THE ", " CAT"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn sliding_matches_rebuilt_windows() {
        let cases: Vec<Vec<String>> = vec![
            tokens(&["THE", "CAT", "SAT", "ON", "THE", "MAT"]),
            tokens(&["A", "A", "A", "A"]),
            tokens(&["THE", "", "CAT", "", "", "SAT"]),
            tokens(&["ONLY"]),
            tokens(&[]),
        ];
        for seq in &cases {
            for window in 1..=4 {
                let slid = extract_phrases(seq, window).unwrap();
                assert_eq!(
                    slid,
                    rebuilt_phrases(seq, window),
                    "window {window} over {seq:?}"
                );
            }
        }
    }

    #[test]
    fn report_counts_tokens_and_phrases() {
        let lines = vec!["the cat sat".to_string(), "the cat ran".to_string()];
        let report = phrase_report(&lines, 2, false).unwrap();
        assert_eq!(report.tokens, 6);
        // THE CAT, CAT SAT, SAT THE, THE CAT (dup), CAT RAN
        assert_eq!(report.distinct, 4);
        assert!(report.phrases.is_none());
    }

    #[test]
    fn report_lists_sorted_phrases_on_request() {
        let lines = vec!["b a c".to_string()];
        let report = phrase_report(&lines, 1, true).unwrap();
        assert_eq!(report.phrases.unwrap(), vec!["A", "B", "C"]);
    }
}
