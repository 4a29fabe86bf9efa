// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search client: load the corpus once, answer every keystroke from memory.
//!
//! # State machine
//!
//! ```text
//!  Unloaded ──begin_load──▶ Loading ──complete_load (2xx + valid JSON)──▶ Ready
//!                              │
//!                              └──── fail_load / non-2xx / bad JSON ────▶ Failed
//! ```
//!
//! There are no edges out of `Ready` or `Failed`. A page gets one load attempt;
//! trying again means reloading the page, which means a new client.
//!
//! # Queries in each state
//!
//! | State    | Results | Status                       |
//! |----------|---------|------------------------------|
//! | Unloaded | none    | `Pending`                    |
//! | Loading  | none    | `Pending`                    |
//! | Ready    | matches | `Ready`                      |
//! | Failed   | none    | `Unavailable` (with reason)  |
//!
//! The status is what lets a UI say "search unavailable" instead of showing a
//! misleading "no results".

mod source;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use source::*;

use crate::error::{ClientError, LoadError};
use crate::search::SearchIndex;
use crate::types::{Corpus, PostRecord, SearchOptions};

/// Where the client is in its one-shot load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready(SearchIndex),
    Failed(LoadError),
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Unloaded => "unloaded",
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

/// Whether a query's (possibly empty) result list can be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum QueryStatus {
    /// Corpus not in memory yet
    Pending,
    /// Results are authoritative
    Ready,
    /// The corpus failed to load; results are always empty
    Unavailable { reason: String },
}

/// Results of one query plus the client state they were computed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse<'a> {
    pub results: Vec<&'a PostRecord>,
    pub status: QueryStatus,
}

impl QueryResponse<'_> {
    /// False once the client has failed. Pending still counts as available.
    pub fn is_available(&self) -> bool {
        !matches!(self.status, QueryStatus::Unavailable { .. })
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Applied by sources that do network I/O
    pub timeout: Duration,
    pub options: SearchOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: Duration::from_secs(10),
            options: SearchOptions::default(),
        }
    }
}

/// Owns the corpus for one page lifetime.
#[derive(Debug, Clone)]
pub struct SearchClient {
    state: LoadState,
    options: SearchOptions,
}

impl Default for SearchClient {
    fn default() -> Self {
        SearchClient::new()
    }
}

impl SearchClient {
    pub fn new() -> Self {
        SearchClient::with_options(SearchOptions::default())
    }

    pub fn with_options(options: SearchOptions) -> Self {
        SearchClient {
            state: LoadState::Unloaded,
            options,
        }
    }

    /// A client that is already `Ready` with `corpus`. No load step.
    pub fn from_corpus(corpus: Corpus) -> Self {
        SearchClient {
            state: LoadState::Ready(SearchIndex::new(corpus)),
            options: SearchOptions::default(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// Unloaded → Loading.
    pub fn begin_load(&mut self) -> Result<(), ClientError> {
        match self.state {
            LoadState::Unloaded => {
                self.state = LoadState::Loading;
                tracing::debug!("corpus load started");
                Ok(())
            }
            ref other => Err(ClientError::AlreadyStarted(other.name())),
        }
    }

    /// Loading → Ready, or Loading → Failed if the response is unusable.
    ///
    /// Returns `Ok` in both cases; the outcome is in [`SearchClient::state`].
    pub fn complete_load(&mut self, response: FetchResponse) -> Result<(), ClientError> {
        self.expect_loading()?;

        if !response.is_success() {
            return self.fail_load(LoadError::Status(response.status));
        }

        match Corpus::from_json(&response.body) {
            Ok(corpus) => {
                tracing::info!(records = corpus.len(), "search corpus ready");
                self.state = LoadState::Ready(SearchIndex::new(corpus));
                Ok(())
            }
            Err(err) => self.fail_load(err.into()),
        }
    }

    /// Loading → Failed.
    pub fn fail_load(&mut self, error: LoadError) -> Result<(), ClientError> {
        self.expect_loading()?;
        tracing::warn!(error = %error, "search corpus unavailable");
        self.state = LoadState::Failed(error);
        Ok(())
    }

    /// Run the whole load against `source`.
    ///
    /// Only errors on misuse (a second load). Fetch and parse failures land
    /// the client in `Failed`.
    pub async fn load<S>(&mut self, source: &S) -> Result<(), ClientError>
    where
        S: CorpusSource + ?Sized,
    {
        self.begin_load()?;
        tracing::debug!(source = %source.describe(), "fetching corpus");
        match source.fetch().await {
            Ok(response) => self.complete_load(response),
            Err(err) => self.fail_load(err),
        }
    }

    /// Answer a query with the client's default options.
    pub fn query(&self, query: &str) -> QueryResponse<'_> {
        self.query_with_options(query, &self.options)
    }

    pub fn query_with_options(&self, query: &str, options: &SearchOptions) -> QueryResponse<'_> {
        match &self.state {
            LoadState::Ready(index) => QueryResponse {
                results: index.search_with_options(query, options),
                status: QueryStatus::Ready,
            },
            LoadState::Failed(err) => QueryResponse {
                results: Vec::new(),
                status: QueryStatus::Unavailable {
                    reason: err.to_string(),
                },
            },
            LoadState::Unloaded | LoadState::Loading => QueryResponse {
                results: Vec::new(),
                status: QueryStatus::Pending,
            },
        }
    }

    fn expect_loading(&self) -> Result<(), ClientError> {
        match self.state {
            LoadState::Loading => Ok(()),
            ref other => Err(ClientError::NotLoading(other.name())),
        }
    }
}
