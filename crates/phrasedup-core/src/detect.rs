//! Corpus comparison.
//!
//! Pairs every document against every other, counts shared phrases, filters
//! by threshold, and ranks what survives. The pairing loop is O(n²) in
//! document count; with the cached extraction policy each document is read
//! and extracted exactly once, so total work is dominated by the comparisons
//! themselves.

use std::collections::HashMap;
use std::sync::Arc;

use camino::Utf8Path;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cache::PhraseCache;
use crate::corpus::{DirectorySource, DocumentSource};
use crate::error::{DetectError, DetectResult};
use crate::matching;
use crate::phrase::{self, PhraseSet};
use crate::rank::{self, PairMatch};
use crate::tokenize;

/// How the comparator obtains phrase sets during the pair loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExtractionPolicy {
    /// Extract each document once, on first reference, and memoize it for
    /// every later pair.
    #[default]
    Cached,
    /// Re-extract for every pair. Same output as [`Self::Cached`], strictly
    /// more work; kept as the reference behavior.
    PerPair,
}

impl ExtractionPolicy {
    /// Returns the policy as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::PerPair => "per-pair",
        }
    }
}

impl std::fmt::Display for ExtractionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a corpus scan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScanReport {
    /// Phrase window width used.
    pub window: usize,
    /// Match-count threshold; pairs must strictly exceed it to be reported.
    pub threshold: usize,
    /// Extraction policy used.
    pub policy: ExtractionPolicy,
    /// Number of documents enumerated.
    pub documents: usize,
    /// Number of unordered pairs compared.
    pub pairs_compared: usize,
    /// Pairs above the threshold, ranked by match count, non-ascending.
    pub matches: Vec<PairMatch>,
}

/// Configured corpus comparator.
///
/// Compares every unordered document pair exactly once: for documents at
/// positions `i < j` in corpus order, the pair is keyed `"name_i-name_j"`
/// and never the reverse.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    window: usize,
    threshold: usize,
    policy: ExtractionPolicy,
}

impl Detector {
    /// Create a detector with the default (cached) extraction policy.
    pub const fn new(window: usize, threshold: usize) -> Self {
        Self {
            window,
            threshold,
            policy: ExtractionPolicy::Cached,
        }
    }

    /// Select the extraction policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compare every document pair in `source` and rank the result.
    ///
    /// # Errors
    ///
    /// [`DetectError::InvalidWindow`] for a zero window,
    /// [`DetectError::InvalidDirectory`] when the source cannot be listed,
    /// [`DetectError::ReadDocument`] / [`DetectError::DocumentTooLarge`] when
    /// any document cannot be read, [`DetectError::MissingPhrases`] when a
    /// required phrase set is absent. Every failure aborts the run with no
    /// partial result.
    #[tracing::instrument(
        skip_all,
        fields(window = self.window, threshold = self.threshold, policy = self.policy.as_str())
    )]
    pub fn detect<S: DocumentSource>(&self, source: &S) -> DetectResult<ScanReport> {
        if self.window < 1 {
            return Err(DetectError::InvalidWindow {
                window: self.window,
            });
        }

        let names = source.list()?;
        tracing::debug!(documents = names.len(), "corpus enumerated");

        let mut cache = PhraseCache::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut pairs_compared = 0usize;

        for (i, first) in names.iter().enumerate() {
            for second in &names[i + 1..] {
                let mine = self.phrases_for(source, &mut cache, first)?;
                let theirs = self.phrases_for(source, &mut cache, second)?;

                let matched = matching::count_matches(&mine, &theirs);
                pairs_compared += 1;

                if matched > self.threshold {
                    counts.insert(format!("{first}-{second}"), matched);
                }
            }
        }

        let matches = rank::rank_matches(&counts);
        tracing::info!(
            documents = names.len(),
            pairs = pairs_compared,
            reported = matches.len(),
            "scan complete"
        );

        Ok(ScanReport {
            window: self.window,
            threshold: self.threshold,
            policy: self.policy,
            documents: names.len(),
            pairs_compared,
            matches,
        })
    }

    /// Obtain a document's phrase set according to the extraction policy.
    ///
    /// Under [`ExtractionPolicy::Cached`] the set is extracted on first
    /// reference and served from the cache afterwards; a cache that still
    /// cannot produce it is a comparison-input failure, not a zero count.
    fn phrases_for<S: DocumentSource>(
        &self,
        source: &S,
        cache: &mut PhraseCache,
        name: &str,
    ) -> DetectResult<Arc<PhraseSet>> {
        match self.policy {
            ExtractionPolicy::Cached => {
                if !cache.contains(name) {
                    let extracted = self.extract(source, name)?;
                    cache.insert(name, extracted);
                }
                cache.get(name).ok_or_else(|| DetectError::MissingPhrases {
                    name: name.to_string(),
                })
            }
            ExtractionPolicy::PerPair => self.extract(source, name).map(Arc::new),
        }
    }

    fn extract<S: DocumentSource>(&self, source: &S, name: &str) -> DetectResult<PhraseSet> {
        let lines = source.read_lines(name)?;
        let tokens = tokenize::tokenize(&lines);
        phrase::extract_phrases(&tokens, self.window)
    }
}

/// Scan a directory with the default (cached) policy and no filters.
///
/// Convenience wrapper over [`Detector`] + [`DirectorySource`] for callers
/// that just want the ranked mapping.
///
/// # Errors
///
/// Same conditions as [`Detector::detect`].
pub fn detect_in_directory<P: AsRef<Utf8Path>>(
    dir: P,
    window: usize,
    threshold: usize,
) -> DetectResult<ScanReport> {
    Detector::new(window, threshold).detect(&DirectorySource::new(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory corpus that counts how often each document is read.
    struct MemorySource {
        docs: Vec<(String, Vec<String>)>,
        reads: RefCell<HashMap<String, usize>>,
    }

    impl MemorySource {
        fn new(docs: &[(&str, &[&str])]) -> Self {
            Self {
                docs: docs
                    .iter()
                    .map(|(name, lines)| {
                        (
                            (*name).to_string(),
                            lines.iter().map(|l| (*l).to_string()).collect(),
                        )
                    })
                    .collect(),
                reads: RefCell::new(HashMap::new()),
            }
        }

        fn reads_of(&self, name: &str) -> usize {
            self.reads.borrow().get(name).copied().unwrap_or(0)
        }
    }

    impl DocumentSource for MemorySource {
        fn list(&self) -> DetectResult<Vec<String>> {
            Ok(self.docs.iter().map(|(name, _)| name.clone()).collect())
        }

        fn read_lines(&self, name: &str) -> DetectResult<Vec<String>> {
            *self.reads.borrow_mut().entry(name.to_string()).or_insert(0) += 1;
            self.docs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, lines)| lines.clone())
                .ok_or_else(|| DetectError::ReadDocument {
                    name: name.to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }
    }

    #[test]
    fn worked_example_reports_single_shared_phrase() {
        // doc1 [THE, CAT, SAT] vs doc2 [THE, CAT, RAN]: only "THE CAT" shared.
        let source = MemorySource::new(&[
            ("doc1", &["the cat sat"]),
            ("doc2", &["the cat ran"]),
        ]);
        let report = Detector::new(2, 0).detect(&source).unwrap();
        assert_eq!(report.documents, 2);
        assert_eq!(report.pairs_compared, 1);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].pair, "doc1-doc2");
        assert_eq!(report.matches[0].matches, 1);
    }

    #[test]
    fn threshold_is_strict() {
        // Same corpus; count 1 does not exceed threshold 1.
        let source = MemorySource::new(&[
            ("doc1", &["the cat sat"]),
            ("doc2", &["the cat ran"]),
        ]);
        let report = Detector::new(2, 1).detect(&source).unwrap();
        assert!(report.matches.is_empty());
        assert_eq!(report.pairs_compared, 1);
    }

    #[test]
    fn identical_pair_outranks_unrelated_documents() {
        let essay: &[&str] = &["we hold these truths to be self evident"];
        let source = MemorySource::new(&[
            ("a.txt", essay),
            ("b.txt", essay),
            ("c.txt", &["completely different words entirely here now"]),
        ]);
        let report = Detector::new(3, 0).detect(&source).unwrap();
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].pair, "a.txt-b.txt");
        // Identical documents share their whole phrase set: 8 tokens, window 3.
        assert_eq!(report.matches[0].matches, 6);
    }

    #[test]
    fn pair_keys_follow_corpus_order_and_never_reverse() {
        let source = MemorySource::new(&[
            ("z-doc", &["shared phrase here"]),
            ("a-doc", &["shared phrase here"]),
        ]);
        // MemorySource preserves insertion order, so z-doc enumerates first.
        let report = Detector::new(2, 0).detect(&source).unwrap();
        assert_eq!(report.matches[0].pair, "z-doc-a-doc");
        assert!(!report.matches.iter().any(|m| m.pair == "a-doc-z-doc"));
    }

    #[test]
    fn ranking_is_non_ascending() {
        let source = MemorySource::new(&[
            ("a", &["one two three four five"]),
            ("b", &["one two three four five"]),
            ("c", &["one two three nothing else"]),
        ]);
        let report = Detector::new(2, 0).detect(&source).unwrap();
        let values: Vec<usize> = report.matches.iter().map(|m| m.matches).collect();
        let mut sorted = values.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(values, sorted);
        assert_eq!(report.matches[0].pair, "a-b");
    }

    #[test]
    fn zero_window_fails_before_any_read() {
        let source = MemorySource::new(&[("doc1", &["anything"])]);
        let result = Detector::new(0, 0).detect(&source);
        assert!(matches!(result, Err(DetectError::InvalidWindow { .. })));
        assert_eq!(source.reads_of("doc1"), 0);
    }

    #[test]
    fn window_of_one_matches_single_tokens() {
        let source = MemorySource::new(&[
            ("doc1", &["alpha beta"]),
            ("doc2", &["beta gamma"]),
        ]);
        let report = Detector::new(1, 0).detect(&source).unwrap();
        assert_eq!(report.matches[0].matches, 1);
    }

    #[test]
    fn cached_policy_reads_each_document_once() {
        let source = MemorySource::new(&[
            ("a", &["x y z"]),
            ("b", &["x y w"]),
            ("c", &["x y v"]),
        ]);
        Detector::new(2, 0).detect(&source).unwrap();
        for name in ["a", "b", "c"] {
            assert_eq!(source.reads_of(name), 1, "document {name}");
        }
    }

    #[test]
    fn per_pair_policy_re_reads_per_comparison() {
        let source = MemorySource::new(&[
            ("a", &["x y z"]),
            ("b", &["x y w"]),
            ("c", &["x y v"]),
        ]);
        Detector::new(2, 0)
            .with_policy(ExtractionPolicy::PerPair)
            .detect(&source)
            .unwrap();
        // Each of 3 documents joins 2 of the 3 pairs.
        for name in ["a", "b", "c"] {
            assert_eq!(source.reads_of(name), 2, "document {name}");
        }
    }

    #[test]
    fn cached_and_per_pair_policies_agree() {
        let docs: &[(&str, &[&str])] = &[
            ("essay1.txt", &["the quick brown fox jumps over the lazy dog"]),
            ("essay2.txt", &["the quick brown fox walks past the lazy dog"]),
            ("essay3.txt", &["an entirely unrelated piece of writing", "with a second line"]),
            ("essay4.txt", &["the quick brown fox jumps over the lazy dog"]),
        ];
        for window in 1..=3 {
            for threshold in 0..=2 {
                let cached = Detector::new(window, threshold)
                    .detect(&MemorySource::new(docs))
                    .unwrap();
                let naive = Detector::new(window, threshold)
                    .with_policy(ExtractionPolicy::PerPair)
                    .detect(&MemorySource::new(docs))
                    .unwrap();
                assert_eq!(
                    cached.matches, naive.matches,
                    "window {window}, threshold {threshold}"
                );
            }
        }
    }

    #[test]
    fn detection_is_idempotent() {
        let docs: &[(&str, &[&str])] = &[
            ("a", &["repeat after me word for word"]),
            ("b", &["repeat after me word for word"]),
            ("c", &["something else entirely said here"]),
        ];
        let first = Detector::new(2, 0).detect(&MemorySource::new(docs)).unwrap();
        let second = Detector::new(2, 0).detect(&MemorySource::new(docs)).unwrap();
        assert_eq!(first.matches, second.matches);
    }

    #[test]
    fn read_failure_aborts_the_run() {
        struct FailingSource;
        impl DocumentSource for FailingSource {
            fn list(&self) -> DetectResult<Vec<String>> {
                Ok(vec!["good".to_string(), "bad".to_string()])
            }
            fn read_lines(&self, name: &str) -> DetectResult<Vec<String>> {
                if name == "bad" {
                    Err(DetectError::ReadDocument {
                        name: name.to_string(),
                        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                    })
                } else {
                    Ok(vec!["some words here".to_string()])
                }
            }
        }
        let result = Detector::new(2, 0).detect(&FailingSource);
        assert!(matches!(result, Err(DetectError::ReadDocument { .. })));
    }

    #[test]
    fn report_serializes_matches_in_rank_order() {
        let source = MemorySource::new(&[
            ("a", &["one two three four five"]),
            ("b", &["one two three four five"]),
            ("c", &["one two three other words"]),
        ]);
        let report = Detector::new(2, 0).detect(&source).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["policy"], "cached");
        assert_eq!(json["matches"][0]["pair"], "a-b");
        let counts: Vec<u64> = json["matches"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["matches"].as_u64().unwrap())
            .collect();
        let mut sorted = counts.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }

    #[test]
    fn documents_shorter_than_window_compare_clean() {
        let source = MemorySource::new(&[("tiny1", &["hello"]), ("tiny2", &["hello"])]);
        let report = Detector::new(3, 0).detect(&source).unwrap();
        assert!(report.matches.is_empty());
        assert_eq!(report.pairs_compared, 1);
    }
}
