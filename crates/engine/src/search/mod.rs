//! Search module for indexing and retrieval operations
//!
//! This module contains:
//! - `types`: request/response types (SearchRequest, SearchHit, IndexStats, ...)
//! - `tokenizer`: text normalization and term extraction
//! - `index`: the mutable inverted index over entries
//! - `planner`: query parsing, candidate intersection, filter application
//! - `scorer`: fixed-weight relevance scoring
//! - `task`: background search with advisory cancellation

mod index;
mod planner;
mod scorer;
mod task;
pub mod tokenizer;
mod types;

pub use index::EntryIndex;
pub use task::SearchJob;
pub use tokenizer::{normalize, tokenize, Terms};
pub use types::{FieldMask, IndexConfig, IndexStats, SearchHit, SearchRequest, SearchResponse};
