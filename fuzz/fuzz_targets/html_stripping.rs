// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for body stripping.
//!
//! Rendered post bodies are whatever the markdown engine and the author's
//! inline HTML produced. Unclosed tags, stray ampersands and broken entities
//! must never panic, and the output must never carry a tag or a run of
//! whitespace into the corpus.

#![no_main]

use libfuzzer_sys::fuzz_target;
use gleaner::{decode_entities, HtmlStripper, MarkupStripper};

fuzz_target!(|data: &[u8]| {
    let markup = String::from_utf8_lossy(data);
    // Cap length to avoid timeouts
    let markup: String = markup.chars().take(4096).collect();

    let text = HtmlStripper.strip(&markup);
    assert_eq!(text.trim(), text, "output should be trimmed");
    assert!(!text.contains("  "), "output should have no double spaces");
    assert!(!text.contains('\n'), "output should be one line");

    // Entity decoding is total
    let _ = decode_entities(&markup);
});
