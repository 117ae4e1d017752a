//! Public types for the jot API.
//!
//! This module re-exports types from the internal crates with a clean
//! public interface.

// Entry value types
pub use jot_core::{Entry, EntryId};

// Workspace error type
pub use jot_core::{Error, Result};

// Search engine surface
pub use jot_engine::{
    EntryIndex, FieldMask, IndexConfig, IndexStats, SearchHit, SearchJob, SearchRequest,
    SearchResponse,
};
