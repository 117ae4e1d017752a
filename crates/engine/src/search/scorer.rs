//! Fixed-weight relevance scoring
//!
//! The weights are a behavioral contract, not tunables: results must rank
//! identically across releases for the same index state. Scores order
//! results within one query only; absolute values are meaningless.
//!
//! Matching here is substring-based over normalized text, deliberately
//! looser than the token-level candidate selection that precedes it.

use chrono::{DateTime, Duration, Utc};
use jot_core::Entry;

use super::tokenizer::normalize;

/// Title contains the term as a substring.
const TITLE_WEIGHT: i64 = 10;
/// Normalized title equals the term exactly (on top of the contains score).
const EXACT_TITLE_BONUS: i64 = 20;
/// Title starts with the term (on top of the contains score).
const TITLE_PREFIX_BONUS: i64 = 5;
/// Body contains the term.
const BODY_WEIGHT: i64 = 5;
/// Each tag containing the term as a substring.
const TAG_WEIGHT: i64 = 8;
/// A tag equals the term exactly (on top of the per-tag score).
const EXACT_TAG_BONUS: i64 = 12;
/// Entry is flagged favorite (once per entry).
const FAVORITE_BONUS: i64 = 3;
/// Entry was created within the last week (once per entry).
const RECENCY_BONUS: i64 = 2;

/// Days within which an entry counts as recent.
const RECENCY_WINDOW_DAYS: i64 = 7;

/// Score an entry against the parsed query terms.
///
/// With an empty term list (pure filter search) only the global bonuses
/// apply. `now` is injected so ranking is reproducible in tests; the
/// public search path passes the current time.
pub(crate) fn score_entry(
    entry: &Entry,
    terms: &[String],
    case_sensitive: bool,
    now: DateTime<Utc>,
) -> i64 {
    let mut score = 0;

    if !terms.is_empty() {
        let title = normalize(&entry.title, case_sensitive);
        let body = normalize(&entry.body, case_sensitive);
        let tags: Vec<String> = entry
            .tags
            .iter()
            .map(|t| normalize(t, case_sensitive))
            .collect();

        for term in terms {
            let term = term.as_str();

            if title.contains(term) {
                score += TITLE_WEIGHT;
                if title == term {
                    score += EXACT_TITLE_BONUS;
                }
                if title.starts_with(term) {
                    score += TITLE_PREFIX_BONUS;
                }
            }

            if body.contains(term) {
                score += BODY_WEIGHT;
                // Non-overlapping left-to-right occurrence count.
                score += body.matches(term).count() as i64;
            }

            for tag in &tags {
                if tag.contains(term) {
                    score += TAG_WEIGHT;
                    if tag == term {
                        score += EXACT_TAG_BONUS;
                    }
                }
            }
        }
    }

    if entry.favorite {
        score += FAVORITE_BONUS;
    }
    if is_recent(entry.created_at, now) {
        score += RECENCY_BONUS;
    }

    score
}

fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    created_at > now - Duration::days(RECENCY_WINDOW_DAYS)
}
