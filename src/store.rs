//! Entry store contract
//!
//! Persistence lives outside the search core. The store owns durability,
//! validation, and id assignment; the core only needs one thing from it: a
//! full entry listing to rebuild the index at startup.
//!
//! After the initial rebuild, the store keeps the index current by calling
//! the [`crate::SearchService`] mutation hooks synchronously once its own
//! persistence step has succeeded.

use jot_core::{Entry, Result};

/// Source of truth for persisted entries.
pub trait EntryStore: Send + Sync {
    /// Load every persisted entry, in the store's own order. Consumed once
    /// per rebuild.
    fn load_all(&self) -> Result<Vec<Entry>>;
}
