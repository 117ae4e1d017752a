//! Core value types for jot
//!
//! This crate holds the types shared by the search engine and its
//! collaborators:
//! - `Entry`: a single note (title, body, tags, timestamps, favorite flag)
//! - `EntryId`: the immutable identifier assigned by the store
//! - `Error`: the workspace error type

pub mod entry;
pub mod error;

pub use entry::{Entry, EntryId};
pub use error::{Error, Result};
