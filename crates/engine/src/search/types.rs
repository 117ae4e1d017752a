//! Request, response, and configuration types for search

use chrono::NaiveDate;
use jot_core::Entry;
use serde::{Deserialize, Serialize};

// ============================================================================
// IndexConfig
// ============================================================================

/// Index-wide configuration, fixed at construction.
///
/// `use_stemming` and `use_synonyms` are accepted but currently inert; they
/// exist so callers can carry the setting without the engine applying it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndexConfig {
    /// When false (default), all text is lowercased before indexing and
    /// matching.
    pub case_sensitive: bool,
    /// Inert hook; no stemming is applied.
    pub use_stemming: bool,
    /// Inert hook; no synonym expansion is applied.
    pub use_synonyms: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            case_sensitive: false,
            use_stemming: false,
            use_synonyms: false,
        }
    }
}

// ============================================================================
// FieldMask
// ============================================================================

/// Which fields a query term may match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMask {
    pub title: bool,
    pub body: bool,
    pub tags: bool,
}

impl FieldMask {
    /// All fields enabled.
    pub fn all() -> Self {
        FieldMask {
            title: true,
            body: true,
            tags: true,
        }
    }

    /// Title only.
    pub fn title_only() -> Self {
        FieldMask {
            title: true,
            body: false,
            tags: false,
        }
    }
}

impl Default for FieldMask {
    fn default() -> Self {
        Self::all()
    }
}

// ============================================================================
// SearchRequest
// ============================================================================

/// A search over the index: free-text query plus filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text; blank means match-all.
    pub query: String,
    /// Enabled fields for term matching.
    pub fields: FieldMask,
    /// Inclusive lower creation-date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper creation-date bound.
    pub to: Option<NaiveDate>,
    /// Restrict results to favorites.
    pub favorites_only: bool,
}

impl SearchRequest {
    /// Query across all fields with no filters.
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            fields: FieldMask::all(),
            from: None,
            to: None,
            favorites_only: false,
        }
    }

    /// Restrict matching to the given fields.
    pub fn fields(mut self, fields: FieldMask) -> Self {
        self.fields = fields;
        self
    }

    /// Set the inclusive lower creation-date bound.
    pub fn from_date(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the inclusive upper creation-date bound.
    pub fn to_date(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    /// Restrict results to favorites.
    pub fn favorites_only(mut self) -> Self {
        self.favorites_only = true;
        self
    }
}

// ============================================================================
// SearchHit / SearchResponse
// ============================================================================

/// One ranked result: the entry snapshot and its relevance score.
///
/// The score has ordering semantics only; its absolute value carries no
/// meaning across queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub entry: Entry,
    pub score: i64,
}

/// Ranked search results, highest score first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Result ids in rank order. Convenient for assertions.
    pub fn ids(&self) -> Vec<&str> {
        self.hits.iter().map(|h| h.entry.id.as_str()).collect()
    }
}

// ============================================================================
// IndexStats
// ============================================================================

/// Sizes of the index structures at a point in time. Diagnostic only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Entries in the document table.
    pub entries: usize,
    /// Distinct terms in the title postings.
    pub title_terms: usize,
    /// Distinct terms in the body postings.
    pub body_terms: usize,
    /// Distinct tags in the tag postings.
    pub tag_terms: usize,
    /// Distinct calendar dates in the date index.
    pub date_buckets: usize,
    /// Entries currently flagged favorite.
    pub favorites: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder_chain() {
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let req = SearchRequest::new("rust notes")
            .fields(FieldMask::title_only())
            .from_date(from)
            .favorites_only();

        assert_eq!(req.query, "rust notes");
        assert!(req.fields.title && !req.fields.body && !req.fields.tags);
        assert_eq!(req.from, Some(from));
        assert_eq!(req.to, None);
        assert!(req.favorites_only);
    }

    #[test]
    fn test_field_mask_default_is_all() {
        assert_eq!(FieldMask::default(), FieldMask::all());
    }
}
