//! Text normalization and term extraction
//!
//! Pipeline: trim → lowercase (unless case-sensitive) → replace every
//! character that is not a letter, digit, whitespace, or apostrophe with a
//! space → split on whitespace runs. Apostrophes survive so contractions
//! stay one token.
//!
//! Pure functions of (text, case-sensitivity flag); no side effects.

/// Normalize text for indexing and matching.
///
/// The output is NOT re-trimmed: punctuation replaced at the edges leaves
/// spaces there, and exact-match comparisons in the scorer rely on this
/// exact shape.
pub fn normalize(text: &str, case_sensitive: bool) -> String {
    let trimmed = text.trim();
    let lowered;
    let source = if case_sensitive {
        trimmed
    } else {
        lowered = trimmed.to_lowercase();
        &lowered
    };
    source
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || c == '\'' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Lazy, restartable iterator over the normalized terms of a text.
///
/// Yields the non-empty whitespace-separated tokens of [`normalize`]'s
/// output, in order. Call [`Terms::restart`] to rewind; cloning copies the
/// current position and resumes from there.
#[derive(Debug, Clone)]
pub struct Terms {
    text: String,
    pos: usize,
}

impl Terms {
    /// Build a term stream over `text`.
    pub fn new(text: &str, case_sensitive: bool) -> Self {
        Terms {
            text: normalize(text, case_sensitive),
            pos: 0,
        }
    }

    /// Rewind to the first term without re-normalizing.
    pub fn restart(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for Terms {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let rest = &self.text[self.pos..];
        let start = rest.find(|c: char| !c.is_whitespace())?;
        let rest = &rest[start..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += start + end;
        Some(rest[..end].to_string())
    }
}

/// Collect all terms of a text into a vector.
pub fn tokenize(text: &str, case_sensitive: bool) -> Vec<String> {
    Terms::new(text, case_sensitive).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello, World!", false), "hello  world ");
    }

    #[test]
    fn test_normalize_keeps_apostrophes() {
        assert_eq!(normalize("don't", false), "don't");
    }

    #[test]
    fn test_normalize_case_sensitive_mode() {
        assert_eq!(normalize("Hello", true), "Hello");
    }

    #[test]
    fn test_normalize_keeps_unicode_letters_and_digits() {
        assert_eq!(normalize("café 42 µs", false), "café 42 µs");
    }

    #[test]
    fn test_tokenize_splits_on_whitespace_runs() {
        assert_eq!(
            tokenize("  Learning   Java, daily!  ", false),
            vec!["learning", "java", "daily"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_punctuation_only() {
        assert!(tokenize("", false).is_empty());
        assert!(tokenize("?!...", false).is_empty());
    }

    #[test]
    fn test_terms_restart_rewinds_after_consumption() {
        let mut terms = Terms::new("one two three", false);
        assert_eq!(terms.by_ref().count(), 3);
        assert_eq!(terms.next(), None);

        terms.restart();
        assert_eq!(terms.collect::<Vec<_>>(), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_terms_clone_resumes_from_current_position() {
        let mut terms = Terms::new("one two three", false);
        assert_eq!(terms.next().as_deref(), Some("one"));

        let resumed = terms.clone();
        assert_eq!(resumed.collect::<Vec<_>>(), vec!["two", "three"]);
    }

    #[test]
    fn test_terms_keeps_single_characters() {
        // Length filtering happens at indexing and query time, not here.
        assert_eq!(tokenize("a b c", false), vec!["a", "b", "c"]);
    }
}
