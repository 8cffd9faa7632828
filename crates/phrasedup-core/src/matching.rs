//! Phrase-set match counting.

use std::collections::HashSet;

use crate::phrase::PhraseSet;

/// Count the phrases present in both sets, compared case-insensitively.
///
/// Builds a lowercased shadow of one set and probes it with lowercased
/// members of the other. Tokenization already uppercases everything, so the
/// re-normalization here is idempotent; it keeps the count correct even for
/// phrase sets built outside the standard pipeline.
#[tracing::instrument(skip_all, fields(mine = mine.len(), theirs = theirs.len()))]
pub fn count_matches(mine: &PhraseSet, theirs: &PhraseSet) -> usize {
    let shadow: HashSet<String> = theirs.iter().map(|p| p.to_lowercase()).collect();
    mine.iter()
        .filter(|p| shadow.contains(&p.to_lowercase()))
        .count()
}
