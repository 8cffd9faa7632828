//! Result ranking.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One document pair that exceeded the match threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PairMatch {
    /// Pair key, `"first-second"` in corpus enumeration order.
    pub pair: String,
    /// Number of distinct phrases the two documents share.
    pub matches: usize,
}

/// Order pair results by match count, non-ascending.
///
/// Ties order lexicographically by pair key so the ranking is total and
/// reproducible rather than an accident of hash iteration. Works on a copy;
/// the caller's map is left untouched.
#[tracing::instrument(skip_all, fields(pairs = counts.len()))]
pub fn rank_matches(counts: &HashMap<String, usize>) -> Vec<PairMatch> {
    let mut ranked: Vec<PairMatch> = counts
        .iter()
        .map(|(pair, &matches)| PairMatch {
            pair: pair.clone(),
            matches,
        })
        .collect();
    ranked.sort_by(|a, b| b.matches.cmp(&a.matches).then_with(|| a.pair.cmp(&b.pair)));
    ranked
}
