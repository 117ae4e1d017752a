//! Mutable inverted index over note entries
//!
//! This module provides:
//! - `EntryIndex` with per-field postings (title, body, tag)
//! - Auxiliary date and favorite indexes
//! - Incremental add/update/remove plus bulk clear
//! - Ranked search, prefix suggestions, and stats
//!
//! The entry table is the single source of truth; every postings set is a
//! denormalized projection of it. Invariants:
//! - no id appears in any postings set without a table entry
//! - postings never hold empty-string terms or terms of length <= 1
//! - empty postings sets and date buckets are pruned on removal
//! - index state is a deterministic function of the mutation sequence
//!
//! # Thread Safety
//!
//! One `RwLock` guards the whole interior: mutations are mutually
//! exclusive with each other and with in-flight reads, and every read
//! observes a consistent snapshot. A version watermark tracks mutations.
//!
//! Query results are owned clones, never views into the index, so callers
//! cannot reach internal state through them.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use jot_core::{Entry, EntryId};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::planner::{apply_filters, parse_query, plan_candidates};
use super::scorer::score_entry;
use super::tokenizer::{normalize, Terms};
use super::types::{IndexConfig, IndexStats, SearchHit, SearchRequest, SearchResponse};

/// Terms shorter than this are not indexed.
///
/// Query parsing applies a stricter cut (length > 2 plus stop words), so a
/// 2-character term can sit in the index yet never match a query. That
/// asymmetry is contractual.
const MIN_INDEXED_TERM_CHARS: usize = 2;

// ============================================================================
// IndexInner
// ============================================================================

/// Index state behind the lock. The planner reads this directly.
#[derive(Default)]
pub(crate) struct IndexInner {
    /// title term -> ids
    pub(crate) title_postings: BTreeMap<String, FxHashSet<EntryId>>,
    /// body term -> ids
    pub(crate) body_postings: BTreeMap<String, FxHashSet<EntryId>>,
    /// whole normalized tag -> ids
    pub(crate) tag_postings: BTreeMap<String, FxHashSet<EntryId>>,
    /// creation date -> ids
    pub(crate) date_index: BTreeMap<NaiveDate, FxHashSet<EntryId>>,
    /// ids currently flagged favorite
    pub(crate) favorites: FxHashSet<EntryId>,
    /// id -> entry, the source of truth
    pub(crate) entries: FxHashMap<EntryId, Entry>,
}

fn post(map: &mut BTreeMap<String, FxHashSet<EntryId>>, term: String, id: &EntryId) {
    map.entry(term).or_default().insert(id.clone());
}

fn unpost(map: &mut BTreeMap<String, FxHashSet<EntryId>>, term: &str, id: &str) {
    if let Some(ids) = map.get_mut(term) {
        ids.remove(id);
        if ids.is_empty() {
            map.remove(term);
        }
    }
}

// ============================================================================
// EntryIndex
// ============================================================================

/// In-memory search index over entries.
///
/// Built once at startup from the store's full entry list, then mutated
/// incrementally as entries are created, edited, and deleted. Never
/// persisted.
pub struct EntryIndex {
    config: IndexConfig,
    inner: RwLock<IndexInner>,
    /// Incremented on every effective mutation.
    version: AtomicU64,
}

impl Default for EntryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryIndex {
    /// Create an empty index with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an empty index with the given configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        EntryIndex {
            config,
            inner: RwLock::new(IndexInner::default()),
            version: AtomicU64::new(0),
        }
    }

    /// The configuration this index was built with.
    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// Mutation watermark. Strictly increases with every effective
    /// add/update/remove/clear.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    fn bump(&self) {
        self.version.fetch_add(1, Ordering::Release);
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Index an entry.
    ///
    /// No-op for an empty id. Calling this twice for the same id without a
    /// remove in between is not a supported update path; use
    /// [`EntryIndex::update`].
    pub fn add(&self, entry: &Entry) {
        if entry.id.is_empty() {
            return;
        }
        let mut inner = self.inner.write();
        self.add_locked(&mut inner, entry);
        drop(inner);
        self.bump();
        debug!(id = %entry.id, "entry indexed");
    }

    /// Replace `old` with `new` in one exclusive critical section.
    ///
    /// Equivalent to remove(old) followed by add(new); `None` for `old`
    /// behaves as a pure add. `new` may reuse or change the id.
    pub fn update(&self, old: Option<&Entry>, new: &Entry) {
        let mut inner = self.inner.write();
        let mut touched = false;
        if let Some(old) = old {
            touched |= Self::remove_locked(&mut inner, &old.id, self.config);
        }
        if !new.id.is_empty() {
            self.add_locked(&mut inner, new);
            touched = true;
        }
        drop(inner);
        if touched {
            self.bump();
        }
    }

    /// Remove an entry from every structure. No-op for unknown or empty
    /// ids; calling it twice in a row leaves the index unchanged.
    pub fn remove(&self, entry: &Entry) {
        if entry.id.is_empty() {
            return;
        }
        let mut inner = self.inner.write();
        let removed = Self::remove_locked(&mut inner, &entry.id, self.config);
        drop(inner);
        if removed {
            self.bump();
            debug!(id = %entry.id, "entry removed from index");
        }
    }

    /// Reset every structure to empty. Used before a bulk reload.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        *inner = IndexInner::default();
        drop(inner);
        self.bump();
        debug!("index cleared");
    }

    fn add_locked(&self, inner: &mut IndexInner, entry: &Entry) {
        let cs = self.config.case_sensitive;
        let id = &entry.id;

        for term in Terms::new(&entry.title, cs) {
            if term.chars().count() >= MIN_INDEXED_TERM_CHARS {
                post(&mut inner.title_postings, term, id);
            }
        }
        for term in Terms::new(&entry.body, cs) {
            if term.chars().count() >= MIN_INDEXED_TERM_CHARS {
                post(&mut inner.body_postings, term, id);
            }
        }
        // Tags index as whole normalized strings, never tokenized, and
        // with no length floor.
        for tag in &entry.tags {
            let tag = normalize(tag, cs);
            if !tag.is_empty() {
                post(&mut inner.tag_postings, tag, id);
            }
        }

        inner
            .date_index
            .entry(entry.created_at.date_naive())
            .or_default()
            .insert(id.clone());

        if entry.favorite {
            inner.favorites.insert(id.clone());
        }

        inner.entries.insert(id.clone(), entry.clone());
    }

    /// Un-index by id, deriving the postings to touch from the stored
    /// copy (the table is authoritative, not the caller's argument).
    /// Returns false for unknown ids.
    fn remove_locked(inner: &mut IndexInner, id: &EntryId, config: IndexConfig) -> bool {
        let Some(stored) = inner.entries.remove(id) else {
            return false;
        };
        let cs = config.case_sensitive;

        for term in Terms::new(&stored.title, cs) {
            if term.chars().count() >= MIN_INDEXED_TERM_CHARS {
                unpost(&mut inner.title_postings, &term, id);
            }
        }
        for term in Terms::new(&stored.body, cs) {
            if term.chars().count() >= MIN_INDEXED_TERM_CHARS {
                unpost(&mut inner.body_postings, &term, id);
            }
        }
        for tag in &stored.tags {
            let tag = normalize(tag, cs);
            if !tag.is_empty() {
                unpost(&mut inner.tag_postings, &tag, id);
            }
        }

        let date = stored.created_at.date_naive();
        if let Some(ids) = inner.date_index.get_mut(&date) {
            ids.remove(id);
            if ids.is_empty() {
                inner.date_index.remove(&date);
            }
        }

        inner.favorites.remove(id);
        true
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Ranked search: plan candidates, apply filters, score, sort.
    ///
    /// Blank queries (or queries whose every token is filtered out) match
    /// all entries; filters still apply, and ranking falls back to the
    /// global bonuses. Never fails: an over-constrained search returns an
    /// empty response.
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        self.search_at(request, Utc::now())
    }

    /// [`EntryIndex::search`] with an injected clock, for deterministic
    /// recency scoring in tests.
    pub fn search_at(&self, request: &SearchRequest, now: DateTime<Utc>) -> SearchResponse {
        let cs = self.config.case_sensitive;
        let inner = self.inner.read();

        let terms = parse_query(&request.query, cs);
        let mut candidates = plan_candidates(&inner, &terms, &request.fields);
        apply_filters(
            &inner,
            &mut candidates,
            request.from,
            request.to,
            request.favorites_only,
        );

        let mut hits: Vec<SearchHit> = candidates
            .iter()
            .filter_map(|id| inner.entries.get(id))
            .map(|entry| SearchHit {
                score: score_entry(entry, &terms, cs, now),
                entry: entry.clone(),
            })
            .collect();
        drop(inner);

        // Descending by score; ascending id breaks ties deterministically.
        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });

        SearchResponse { hits }
    }

    // ========================================================================
    // Index-only lookups
    // ========================================================================

    /// Entries carrying the exact normalized tag. No scoring; ordered by
    /// id. Blank tags yield nothing.
    pub fn find_by_tag(&self, tag: &str) -> Vec<Entry> {
        let tag = normalize(tag, self.config.case_sensitive);
        if tag.is_empty() {
            return Vec::new();
        }
        let inner = self.inner.read();
        let Some(ids) = inner.tag_postings.get(&tag) else {
            return Vec::new();
        };
        Self::collect_sorted(&inner, ids.iter())
    }

    /// Entries created within the inclusive date range, straight off the
    /// date index. Both bounds absent means all entries. Ordered by id.
    pub fn find_by_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Entry> {
        let inner = self.inner.read();
        if from.is_none() && to.is_none() {
            let ids: Vec<&EntryId> = inner.entries.keys().collect();
            return Self::collect_sorted(&inner, ids.into_iter());
        }
        // An inverted range matches nothing; BTreeMap::range would panic on it.
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Vec::new();
            }
        }

        let lower = from.map_or(std::ops::Bound::Unbounded, std::ops::Bound::Included);
        let upper = to.map_or(std::ops::Bound::Unbounded, std::ops::Bound::Included);
        let ids: Vec<&EntryId> = inner
            .date_index
            .range((lower, upper))
            .flat_map(|(_, ids)| ids.iter())
            .collect();
        Self::collect_sorted(&inner, ids.into_iter())
    }

    /// All favorite entries, ordered by id.
    pub fn find_favorites(&self) -> Vec<Entry> {
        let inner = self.inner.read();
        Self::collect_sorted(&inner, inner.favorites.iter())
    }

    fn collect_sorted<'a>(
        inner: &IndexInner,
        ids: impl Iterator<Item = &'a EntryId>,
    ) -> Vec<Entry> {
        let mut entries: Vec<Entry> = ids
            .filter_map(|id| inner.entries.get(id))
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    // ========================================================================
    // Suggestions
    // ========================================================================

    /// Up to `max` distinct title and tag terms starting with the
    /// normalized prefix, in case-insensitive lexicographic order. Blank
    /// prefixes yield nothing.
    pub fn suggest(&self, prefix: &str, max: usize) -> Vec<String> {
        let prefix = normalize(prefix, self.config.case_sensitive);
        if prefix.is_empty() || max == 0 {
            return Vec::new();
        }

        let inner = self.inner.read();
        // Keyed by lowercased term so ordering and dedup ignore case.
        let mut matches: BTreeMap<String, String> = BTreeMap::new();
        for dictionary in [&inner.title_postings, &inner.tag_postings] {
            for (term, _) in dictionary.range(prefix.clone()..) {
                if !term.starts_with(&prefix) {
                    break;
                }
                matches
                    .entry(term.to_lowercase())
                    .or_insert_with(|| term.clone());
            }
        }

        matches.into_values().take(max).collect()
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Sizes of every index structure at this instant.
    pub fn stats(&self) -> IndexStats {
        let inner = self.inner.read();
        IndexStats {
            entries: inner.entries.len(),
            title_terms: inner.title_postings.len(),
            body_terms: inner.body_postings.len(),
            tag_terms: inner.tag_postings.len(),
            date_buckets: inner.date_index.len(),
            favorites: inner.favorites.len(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
