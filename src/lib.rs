//! jot — full-text search and relevance ranking over personal notes
//!
//! The core is a mutable in-memory inverted index ([`jot_engine::EntryIndex`])
//! kept in sync with an external entry store. This crate wires the two
//! together: [`store::EntryStore`] is the contract the store implements,
//! and [`service::SearchService`] is the explicitly constructed service the
//! application's composition root owns and passes around — there is no
//! process-wide singleton.
//!
//! The index is never persisted. At startup the service rebuilds it from
//! `load_all()`; afterwards the store calls the `on_entry_*` hooks
//! synchronously after each of its own persistence steps succeeds, so the
//! index never reflects an entry that failed to persist.

pub mod service;
pub mod store;
pub mod types;

pub use service::SearchService;
pub use store::EntryStore;
pub use types::*;
