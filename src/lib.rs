//! Search for static blogs: a build-time corpus and an in-memory query client.
//!
//! At site build time the [`build`] module turns every published post into a
//! [`PostRecord`] (title, url, date, categories, markup-free content) and
//! writes them, in site order, as one JSON array. In the browser (or any other
//! host) a [`SearchClient`] loads that array once and answers each keystroke
//! with a case-insensitive substring scan.
//!
//! # Architecture
//!
//! ```text
//!  site generator                         browser / CLI
//! ┌──────────────┐   ┌─────────────┐   ┌──────────────────┐
//! │ SourcePost[] │──▶│   build     │──▶│   search.json    │
//! └──────────────┘   │ (strip.rs)  │   └────────┬─────────┘
//!                    └─────────────┘            │ fetch once
//!                                               ▼
//!                                     ┌──────────────────┐
//!                                     │  client          │
//!                                     │  (LoadState)     │
//!                                     └────────┬─────────┘
//!                                              │ every keystroke
//!                                              ▼
//!                                     ┌──────────────────┐
//!                                     │  search          │
//!                                     │  (SearchIndex)   │
//!                                     └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use gleaner::{build_corpus, PlainText, SearchClient, SourcePost};
//!
//! let posts = vec![SourcePost {
//!     title: Some("Docker Registry".to_string()),
//!     url: Some("/dr".to_string()),
//!     body: "private image repository".to_string(),
//!     ..SourcePost::default()
//! }];
//! let corpus = build_corpus(&posts, &PlainText).corpus;
//!
//! let client = SearchClient::from_corpus(corpus);
//! let response = client.query("DOCKER");
//! assert_eq!(response.results[0].url, "/dr");
//! ```

// Module declarations
pub mod build;
pub mod client;
pub mod error;
mod search;
mod strip;
#[doc(hidden)]
pub mod testing;
mod types;
mod utils;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use build::{
    build_corpus, read_manifest, run_build, write_corpus, ArtifactInfo, AssembledCorpus,
    BuildOptions, BuildReport, InputManifest, SkippedPost, SourcePost, CORPUS_ARTIFACT,
};
pub use client::{
    ClientConfig, CorpusSource, FetchResponse, FileSource, LoadState, MemorySource,
    QueryResponse, QueryStatus, SearchClient,
};
#[cfg(feature = "http")]
pub use client::HttpSource;
pub use error::{BuildError, ClientError, CorpusError, LoadError, SkipReason};
pub use search::{matches, search, search_with_options, SearchIndex};
#[cfg(feature = "html")]
pub use strip::HtmlStripper;
pub use strip::{decode_entities, MarkupStripper, PlainText};
pub use types::{Corpus, PostRecord, SearchOptions};
pub use utils::{collapse_whitespace, normalize, normalize_date};
