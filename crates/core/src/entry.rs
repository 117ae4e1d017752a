//! Note entry type
//!
//! An `Entry` is the unit the search engine indexes. The id is assigned
//! once by the store and never changes; editing title/body/tags keeps the
//! same id. The relevance score is deliberately NOT a field here: search
//! results carry it alongside the entry, never on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the entry store at creation time.
pub type EntryId = String;

/// Number of characters shown by [`Entry::preview`].
const PREVIEW_CHARS: usize = 150;

/// A single note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Immutable unique identifier.
    pub id: EntryId,
    /// Entry title.
    pub title: String,
    /// Entry body text.
    pub body: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Creation timestamp; its calendar date feeds the date index.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp. Not indexed.
    pub modified_at: DateTime<Utc>,
    /// Favorite flag.
    pub favorite: bool,
    /// Free-form mood label. Carried through unmodified, not indexed.
    pub mood: String,
}

impl Entry {
    /// Create an entry with the given id, title, and body.
    ///
    /// Timestamps default to now; tags are empty, favorite is off.
    pub fn new(id: impl Into<EntryId>, title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Entry {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            tags: Vec::new(),
            created_at: now,
            modified_at: now,
            favorite: false,
            mood: "Neutral".to_string(),
        }
    }

    /// Set the tags.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the creation timestamp (also aligns the modification timestamp).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.modified_at = created_at;
        self
    }

    /// Set the favorite flag.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Set the mood label.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = mood.into();
        self
    }

    /// Record a modification.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Short body excerpt for list views.
    pub fn preview(&self) -> String {
        if self.body.chars().count() > PREVIEW_CHARS {
            let cut: String = self.body.chars().take(PREVIEW_CHARS).collect();
            format!("{cut}...")
        } else {
            self.body.clone()
        }
    }
}
