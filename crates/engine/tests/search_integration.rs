//! End-to-end engine tests
//!
//! Exercises the full pipeline (tokenize → plan → filter → score → rank)
//! over realistic entries, plus property tests for the index mutation
//! invariants.

use chrono::{Duration, TimeZone, Utc};
use jot_core::Entry;
use jot_engine::{EntryIndex, SearchRequest};
use proptest::prelude::*;

fn sample_index() -> EntryIndex {
    let created = Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap();
    let index = EntryIndex::new();
    index.add(
        &Entry::new("1", "Java Programming", "Learning Java is fun")
            .with_tags(["programming"])
            .with_created_at(created),
    );
    index.add(
        &Entry::new("2", "Personal Thoughts", "Today was a good day")
            .with_tags(["personal"])
            .with_created_at(created),
    );
    index
}

#[test]
fn tag_lookup_finds_exactly_the_tagged_entry() {
    let index = sample_index();

    let hits = index.find_by_tag("programming");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
}

#[test]
fn full_text_search_matches_only_the_java_entry() {
    let index = sample_index();

    let resp = index.search(&SearchRequest::new("java"));
    assert_eq!(resp.ids(), vec!["1"]);
}

#[test]
fn search_hits_carry_scores_not_entries() {
    let index = sample_index();

    let resp = index.search(&SearchRequest::new("java"));
    let hit = &resp.hits[0];
    // Title contains + prefix, body contains + one occurrence.
    assert!(hit.score >= 10 + 5 + 5 + 1);
    // The entry snapshot itself has no score field to go stale.
    assert_eq!(hit.entry, index.find_by_tag("programming")[0]);
}

#[test]
fn favorites_only_with_no_favorites_is_empty_not_an_error() {
    let index = sample_index();

    let resp = index.search(&SearchRequest::new("").favorites_only());
    assert!(resp.is_empty());
}

#[test]
fn two_character_tag_is_reachable_by_tag_but_not_by_query() {
    let index = sample_index();
    index.add(
        &Entry::new("3", "Status", "All systems go")
            .with_tags(["ok"])
            .with_created_at(Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap()),
    );

    // Indexed as a whole tag despite its length.
    assert_eq!(index.find_by_tag("ok").len(), 1);
    assert!(index.stats().tag_terms >= 3);

    // Typed as a query, the token is discarded and the search degrades to
    // match-all rather than matching the tag.
    let resp = index.search(&SearchRequest::new("ok"));
    assert_eq!(resp.len(), 3);
}

#[test]
fn multi_term_query_requires_every_term_somewhere() {
    let index = sample_index();

    // "java" (entry 1) AND "good" (entry 2) never co-occur.
    assert!(index.search(&SearchRequest::new("java good")).is_empty());
    // "learning" and "fun" both live in entry 1's body.
    assert_eq!(index.search(&SearchRequest::new("learning fun")).ids(), vec!["1"]);
}

#[test]
fn rebuild_cycle_clear_then_bulk_add() {
    let index = sample_index();
    let before = index.stats();

    index.clear();
    assert_eq!(index.stats().entries, 0);

    let created = Utc.with_ymd_and_hms(2026, 4, 2, 8, 0, 0).unwrap();
    index.add(
        &Entry::new("1", "Java Programming", "Learning Java is fun")
            .with_tags(["programming"])
            .with_created_at(created),
    );
    index.add(
        &Entry::new("2", "Personal Thoughts", "Today was a good day")
            .with_tags(["personal"])
            .with_created_at(created),
    );

    // Deterministic: same mutation sequence, same state.
    assert_eq!(index.stats(), before);
}

// ============================================================================
// Property tests
// ============================================================================

fn arb_entry(id_prefix: &'static str) -> impl Strategy<Value = Entry> {
    (
        "[a-z]{1,6}",
        "[a-zA-Z' ]{0,24}",
        "[a-zA-Z' .,!]{0,48}",
        proptest::collection::vec("[a-z]{1,8}", 0..3),
        0i64..3650,
        any::<bool>(),
    )
        .prop_map(move |(id, title, body, tags, age_days, favorite)| {
            let created = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
            Entry::new(format!("{id_prefix}{id}"), title, body)
                .with_tags(tags)
                .with_created_at(created - Duration::days(age_days))
                .with_favorite(favorite)
        })
}

proptest! {
    #[test]
    fn prop_add_remove_round_trip(
        baseline in proptest::collection::vec(arb_entry("b"), 0..8),
        extra in arb_entry("x"),
    ) {
        let index = EntryIndex::new();
        for entry in &baseline {
            index.add(entry);
        }
        let before = index.stats();

        index.add(&extra);
        index.remove(&extra);

        prop_assert_eq!(index.stats(), before);
    }

    #[test]
    fn prop_remove_twice_equals_once(
        baseline in proptest::collection::vec(arb_entry("b"), 0..8),
        victim in arb_entry("x"),
    ) {
        let index = EntryIndex::new();
        for entry in &baseline {
            index.add(entry);
        }
        index.add(&victim);

        index.remove(&victim);
        let after_once = index.stats();
        let version_once = index.version();

        index.remove(&victim);
        prop_assert_eq!(index.stats(), after_once);
        prop_assert_eq!(index.version(), version_once);
    }

    #[test]
    fn prop_search_never_returns_unknown_ids(
        entries in proptest::collection::vec(arb_entry("e"), 0..10),
        query in "[a-z ]{0,16}",
    ) {
        let index = EntryIndex::new();
        for entry in &entries {
            index.add(entry);
        }

        let resp = index.search(&SearchRequest::new(query));
        for hit in &resp.hits {
            prop_assert!(entries.iter().any(|e| e.id == hit.entry.id));
        }
    }
}
