//! jot search engine
//!
//! A mutable in-memory inverted index over note entries with incremental
//! updates, multi-field weighted search, filtering, and deterministic
//! relevance ranking. The index is never persisted; it is rebuilt from the
//! entry store at startup and mutated in place afterwards.

pub mod search;

pub use search::{
    EntryIndex, FieldMask, IndexConfig, IndexStats, SearchHit, SearchJob, SearchRequest,
    SearchResponse,
};
