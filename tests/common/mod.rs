//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use gleaner::{Corpus, PostRecord};

// Re-export canonical test utilities from gleaner::testing
pub use gleaner::testing::{make_post, make_record, scenario_corpus};

/// Directory containing the build fixtures.
pub const BUILD_FIXTURES_DIR: &str = "data/build-fixtures";

/// Path to one fixture directory under `data/build-fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join(BUILD_FIXTURES_DIR)
        .join(name)
}

/// Urls of `results`, in order.
pub fn urls<'a>(results: &[&'a PostRecord]) -> Vec<&'a str> {
    results.iter().map(|p| p.url.as_str()).collect()
}

/// Read and decode a written artifact.
pub fn read_corpus(path: &Path) -> Corpus {
    let bytes = std::fs::read(path).expect("Failed to read artifact");
    Corpus::from_json(&bytes).expect("Artifact should decode")
}
