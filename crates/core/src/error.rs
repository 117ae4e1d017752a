//! Workspace error type
//!
//! The search engine itself never fails for data-shape issues (malformed
//! input degrades to a no-op). The only fallible surface is the entry
//! store contract, so the taxonomy is small.

use thiserror::Error;

/// Errors surfaced by jot and its store collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// The entry store failed to load or persist entries.
    #[error("entry store failure")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    /// Wrap an arbitrary store error.
    pub fn store(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Error::Store(err.into())
    }
}

/// Result alias using the workspace error type.
pub type Result<T> = std::result::Result<T, Error>;
