// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for corpus artifact decoding.
//!
//! The client parses whatever the server hands it. Truncated files, HTML
//! error pages served with a 200, and hand-edited JSON must all end in a
//! clean `Failed` state, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use gleaner::{Corpus, FetchResponse, LoadState, SearchClient};

fuzz_target!(|data: &[u8]| {
    // Decoding either succeeds with unique urls or reports an error
    if let Ok(corpus) = Corpus::from_json(data) {
        let mut urls: Vec<_> = corpus.iter().map(|p| p.url.as_str()).collect();
        let total = urls.len();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), total, "decoded corpus has duplicate urls");

        // Anything that decodes re-encodes to something that decodes the same
        let bytes = corpus.to_json(false).expect("re-encode");
        assert_eq!(Corpus::from_json(&bytes).expect("re-decode"), corpus);
    }

    // The client never panics and always lands in a terminal state
    let mut client = SearchClient::new();
    client.begin_load().expect("fresh client");
    client
        .complete_load(FetchResponse::ok(data))
        .expect("load in flight");
    assert!(matches!(
        client.state(),
        LoadState::Ready(_) | LoadState::Failed(_)
    ));
});
