// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query matching.
//!
//! Throws arbitrary titles, bodies and queries at the matcher and checks the
//! result set against the rule itself: a post comes back iff the lowercased
//! query is a substring of its lowercased title or content, in corpus order.
//! Emoji, combining marks, and characters whose lowercase form is longer than
//! the original all go through here.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use gleaner::{search, Corpus, PostRecord, SearchIndex};

#[derive(Debug, Arbitrary)]
struct MatchInput {
    posts: Vec<(String, String)>,
    query: String,
}

fuzz_target!(|input: MatchInput| {
    // Cap sizes to avoid timeouts
    let posts: Vec<PostRecord> = input
        .posts
        .into_iter()
        .take(32)
        .enumerate()
        .map(|(i, (title, content))| PostRecord {
            title,
            url: format!("/p/{}", i),
            date: String::new(),
            categories: Vec::new(),
            content,
        })
        .collect();
    let corpus = Corpus::new(posts).expect("urls are unique by construction");
    let query = input.query;

    let scanned = search(&corpus, &query);
    let index = SearchIndex::new(corpus.clone());
    let indexed = index.search(&query);
    assert_eq!(scanned, indexed, "scan and index disagree");

    if query.is_empty() {
        assert!(indexed.is_empty());
        return;
    }

    let folded = query.to_lowercase();
    let expected: Vec<&PostRecord> = corpus
        .iter()
        .filter(|p| {
            p.title.to_lowercase().contains(&folded) || p.content.to_lowercase().contains(&folded)
        })
        .collect();
    assert_eq!(indexed, expected);
});
