//! Run-scoped phrase-set cache.
//!
//! Memoizes each document's phrase set so extraction happens at most once per
//! run, no matter how many pairwise comparisons the document participates in.
//! The cache lives for one detection run and is discarded with it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::phrase::PhraseSet;

/// Per-run memo of document phrase sets, keyed by document name.
///
/// Entries are shared via [`Arc`] so the comparator can hold both sides of a
/// pair without cloning set contents. Detection is single-threaded; a
/// parallel comparator would need a per-key initialization guard to keep the
/// at-most-once property.
#[derive(Debug, Default)]
pub struct PhraseCache {
    entries: HashMap<String, Arc<PhraseSet>>,
}

impl PhraseCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents cached so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` has a cached phrase set.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Look up the cached phrase set for `name`.
    pub fn get(&self, name: &str) -> Option<Arc<PhraseSet>> {
        self.entries.get(name).map(Arc::clone)
    }

    /// Cache `phrases` under `name`, returning the shared handle.
    ///
    /// First writer wins: caching the same name twice keeps the original
    /// entry, preserving the computed-at-most-once guarantee.
    pub fn insert(&mut self, name: &str, phrases: PhraseSet) -> Arc<PhraseSet> {
        Arc::clone(
            self.entries
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(phrases)),
        )
    }
}
