//! Builder invariants over random, partly malformed input.

use std::collections::HashSet;

use gleaner::{build_corpus, Corpus, PlainText, SkipReason, SourcePost};
use proptest::prelude::*;

/// Posts with optional titles and urls drawn from a small pool, so missing
/// fields and duplicate urls both show up often.
fn post_strategy() -> impl Strategy<Value = SourcePost> {
    (
        prop::option::weighted(0.8, "[A-Za-z ]{0,10}"),
        prop::option::weighted(0.8, prop::sample::select(vec!["/a", "/b", "/c", "/d", " "])),
        "[a-z <>/]{0,20}",
    )
        .prop_map(|(title, url, body)| SourcePost {
            title,
            url: url.map(str::to_string),
            body,
            ..SourcePost::default()
        })
}

proptest! {
    /// Every post is either a record or a skip, never both, never neither.
    #[test]
    fn prop_every_post_accounted_for(posts in prop::collection::vec(post_strategy(), 0..12)) {
        let assembled = build_corpus(&posts, &PlainText);
        prop_assert_eq!(assembled.corpus.len() + assembled.skipped.len(), posts.len());
    }

    /// Emitted records have a title, a url, and a url nobody else has.
    #[test]
    fn prop_records_are_well_formed(posts in prop::collection::vec(post_strategy(), 0..12)) {
        let assembled = build_corpus(&posts, &PlainText);
        let mut seen = HashSet::new();
        for record in &assembled.corpus {
            prop_assert!(!record.title.trim().is_empty());
            prop_assert!(!record.url.trim().is_empty());
            prop_assert!(seen.insert(record.url.clone()));
        }
    }

    /// For each url, the first valid post carrying it is the one kept.
    #[test]
    fn prop_first_occurrence_wins(posts in prop::collection::vec(post_strategy(), 0..12)) {
        let assembled = build_corpus(&posts, &PlainText);
        let mut expected = Vec::new();
        let mut seen = HashSet::new();
        for post in &posts {
            if let Ok(record) = post.to_record(&PlainText) {
                if seen.insert(record.url.clone()) {
                    expected.push(record);
                }
            }
        }
        prop_assert_eq!(assembled.corpus.into_posts(), expected);
    }

    /// Duplicates are reported as such, not as missing fields.
    #[test]
    fn prop_duplicate_skips_name_the_url(posts in prop::collection::vec(post_strategy(), 0..12)) {
        let assembled = build_corpus(&posts, &PlainText);
        for skipped in &assembled.skipped {
            if let SkipReason::DuplicateUrl(url) = &skipped.reason {
                prop_assert!(assembled.corpus.get(url).is_some());
            }
        }
    }

    /// Same posts in, same bytes out, and the bytes decode to the same corpus.
    #[test]
    fn prop_build_is_reproducible(posts in prop::collection::vec(post_strategy(), 0..12)) {
        let first = build_corpus(&posts, &PlainText).corpus.to_json(false).unwrap();
        let second = build_corpus(&posts, &PlainText).corpus.to_json(false).unwrap();
        prop_assert_eq!(&first, &second);

        let decoded = Corpus::from_json(&first).unwrap();
        prop_assert_eq!(decoded, build_corpus(&posts, &PlainText).corpus);
    }
}
