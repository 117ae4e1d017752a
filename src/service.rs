//! Search service
//!
//! The application-facing facade over the index. Constructed explicitly at
//! the composition root with the store it mirrors, then passed to whoever
//! needs search; it holds the only reference chain to the index.

use std::sync::Arc;

use chrono::NaiveDate;
use jot_core::{Entry, Result};
use jot_engine::{
    EntryIndex, IndexConfig, IndexStats, SearchJob, SearchRequest, SearchResponse,
};
use tracing::info;

use crate::store::EntryStore;

/// Keeps the search index in lockstep with an entry store.
pub struct SearchService<S> {
    store: S,
    index: Arc<EntryIndex>,
}

impl<S: EntryStore> SearchService<S> {
    /// Service over `store` with the default index configuration.
    ///
    /// The index starts empty; call [`SearchService::rebuild`] to populate
    /// it from the store.
    pub fn new(store: S) -> Self {
        Self::with_config(store, IndexConfig::default())
    }

    /// Service over `store` with an explicit index configuration.
    pub fn with_config(store: S, config: IndexConfig) -> Self {
        SearchService {
            store,
            index: Arc::new(EntryIndex::with_config(config)),
        }
    }

    /// Drop the index and rebuild it from the store's full entry list.
    /// Returns the number of entries indexed.
    pub fn rebuild(&self) -> Result<usize> {
        let entries = self.store.load_all()?;
        self.index.clear();
        for entry in &entries {
            self.index.add(entry);
        }
        info!(count = entries.len(), "search index rebuilt from store");
        Ok(entries.len())
    }

    // ========================================================================
    // Store mutation hooks
    // ========================================================================
    //
    // The store calls these synchronously, after its own persistence step
    // succeeds, in created/updated/deleted order.

    /// A new entry was persisted.
    pub fn on_entry_created(&self, entry: &Entry) {
        self.index.add(entry);
    }

    /// An entry was edited. `old` is the pre-edit snapshot; `None` behaves
    /// as a pure add.
    pub fn on_entry_updated(&self, old: Option<&Entry>, new: &Entry) {
        self.index.update(old, new);
    }

    /// An entry was deleted.
    pub fn on_entry_deleted(&self, entry: &Entry) {
        self.index.remove(entry);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Ranked search over the index.
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        self.index.search(request)
    }

    /// Run a search on a worker thread; cancellation is advisory.
    pub fn search_background(&self, request: SearchRequest) -> SearchJob {
        SearchJob::spawn(Arc::clone(&self.index), request)
    }

    /// Exact-tag lookup, no scoring.
    pub fn find_by_tag(&self, tag: &str) -> Vec<Entry> {
        self.index.find_by_tag(tag)
    }

    /// Creation-date range lookup, no scoring.
    pub fn find_by_date_range(&self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Entry> {
        self.index.find_by_date_range(from, to)
    }

    /// All favorite entries.
    pub fn find_favorites(&self) -> Vec<Entry> {
        self.index.find_favorites()
    }

    /// Prefix suggestions from title and tag terms.
    pub fn suggest(&self, prefix: &str, max: usize) -> Vec<String> {
        self.index.suggest(prefix, max)
    }

    /// Current index structure sizes.
    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    /// Direct access to the underlying index.
    pub fn index(&self) -> &Arc<EntryIndex> {
        &self.index
    }

    /// The store this service mirrors.
    pub fn store(&self) -> &S {
        &self.store
    }
}
