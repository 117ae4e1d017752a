//! Query parsing, candidate intersection, and filter application
//!
//! Queries are AND-semantic: every surviving term must match in at least
//! one enabled field (not necessarily the same field per term). Candidate
//! sets are unordered; ranking happens after scoring.
//!
//! Note the asymmetry with indexing: the index keeps terms of length > 1,
//! while query parsing keeps only terms of length > 2 that are not stop
//! words. A 2-character non-stop-word can therefore exist in the index but
//! never match a query; such a query degrades to match-all.

use std::collections::HashSet;
use std::ops::Bound;

use chrono::NaiveDate;
use jot_core::EntryId;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use tracing::trace;

use super::index::IndexInner;
use super::tokenizer::Terms;
use super::types::FieldMask;

/// Closed list of common low-information English words excluded from query
/// term matching.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
        "does", "did", "will", "would", "should", "could", "can", "may", "might", "must", "shall",
        "this", "that", "these", "those", "i", "you", "he", "she", "it", "we", "they",
    ]
    .into_iter()
    .collect()
});

fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(term.to_lowercase().as_str())
}

/// Parse a raw query into match terms: normalized tokens of length > 2
/// that are not stop words.
pub(crate) fn parse_query(query: &str, case_sensitive: bool) -> Vec<String> {
    let terms: Vec<String> = Terms::new(query, case_sensitive)
        .filter(|t| t.chars().count() > 2)
        .filter(|t| !is_stop_word(t))
        .collect();
    trace!(query, ?terms, "parsed query");
    terms
}

/// Compute the candidate id set for the given terms.
///
/// An empty term list means match-all. Otherwise each term contributes the
/// union of its postings hits across enabled fields, and the per-term sets
/// are intersected, short-circuiting to empty as soon as any term has no
/// matches.
pub(crate) fn plan_candidates(
    inner: &IndexInner,
    terms: &[String],
    fields: &FieldMask,
) -> FxHashSet<EntryId> {
    if terms.is_empty() {
        return inner.entries.keys().cloned().collect();
    }

    let mut candidates: FxHashSet<EntryId> = FxHashSet::default();

    for (i, term) in terms.iter().enumerate() {
        let mut ids_for_term: FxHashSet<EntryId> = FxHashSet::default();

        if fields.title {
            if let Some(ids) = inner.title_postings.get(term) {
                ids_for_term.extend(ids.iter().cloned());
            }
        }
        if fields.body {
            if let Some(ids) = inner.body_postings.get(term) {
                ids_for_term.extend(ids.iter().cloned());
            }
        }
        if fields.tags {
            if let Some(ids) = inner.tag_postings.get(term) {
                ids_for_term.extend(ids.iter().cloned());
            }
        }

        if i == 0 {
            candidates = ids_for_term;
        } else {
            candidates.retain(|id| ids_for_term.contains(id));
        }

        if candidates.is_empty() {
            trace!(term, "term has no matches, short-circuiting");
            return candidates;
        }
    }

    candidates
}

/// Drop candidates outside the inclusive date range or, when requested,
/// outside the favorite set.
///
/// The date bounds are resolved through the date index (range scan over
/// calendar buckets), never by inspecting each candidate's timestamp.
pub(crate) fn apply_filters(
    inner: &IndexInner,
    candidates: &mut FxHashSet<EntryId>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    favorites_only: bool,
) {
    if candidates.is_empty() {
        return;
    }

    if from.is_some() || to.is_some() {
        // An inverted range can match nothing; BTreeMap::range would panic on it.
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                candidates.clear();
                return;
            }
        }

        let lower = from.map_or(Bound::Unbounded, Bound::Included);
        let upper = to.map_or(Bound::Unbounded, Bound::Included);

        let mut in_range: FxHashSet<&EntryId> = FxHashSet::default();
        for (_, ids) in inner.date_index.range((lower, upper)) {
            in_range.extend(ids.iter());
        }
        candidates.retain(|id| in_range.contains(id));
    }

    if favorites_only {
        candidates.retain(|id| inner.favorites.contains(id));
    }
}
