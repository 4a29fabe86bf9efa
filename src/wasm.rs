//! WebAssembly bindings for the search client.
//!
//! The page's JavaScript does the fetch (it owns `fetch`, `AbortController`
//! and the timeout) and reports the outcome here. Everything after that,
//! status checks, parsing and every query, runs in Rust.
//!
//! ```js
//! const client = new SearchIndexClient();
//! client.beginLoad();
//! try {
//!   const res = await fetch("/search.json", { signal: AbortSignal.timeout(10000) });
//!   client.completeLoad(res.status, new Uint8Array(await res.arrayBuffer()));
//! } catch (e) {
//!   client.failLoad(String(e));
//! }
//! input.addEventListener("input", () => render(client.query(input.value)));
//! ```

use crate::client::{FetchResponse, LoadState, QueryStatus, SearchClient};
use crate::error::{ClientError, LoadError};
use crate::types::SearchOptions;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

/// One match, without its content (the page only renders title and link).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultOutput<'a> {
    title: &'a str,
    url: &'a str,
    date: &'a str,
    categories: &'a [String],
}

/// Query response for TypeScript consumption.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryOutput<'a> {
    results: Vec<SearchResultOutput<'a>>,
    /// "pending" | "ready" | "unavailable"
    status: &'static str,
    /// False only when the corpus failed to load
    available: bool,
    /// Why search is unavailable (null otherwise)
    reason: Option<String>,
}

fn to_js_error(err: ClientError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// `undefined`/`null` mean "not given". Anything else must be a valid options
/// object, otherwise the call throws.
fn parse_options(options: Option<JsValue>) -> Result<Option<SearchOptions>, JsValue> {
    options
        .filter(|opts| !opts.is_undefined() && !opts.is_null())
        .map(|opts| {
            from_value(opts).map_err(|e| {
                JsValue::from(js_sys::Error::new(&format!("invalid search options: {}", e)))
            })
        })
        .transpose()
}

/// WASM-accessible search client.
#[wasm_bindgen]
pub struct SearchIndexClient {
    inner: SearchClient,
}

#[wasm_bindgen]
impl SearchIndexClient {
    /// Options (all optional): `limit` caps the number of results.
    /// Throws on malformed options such as a negative limit or an unknown key.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<JsValue>) -> Result<SearchIndexClient, JsValue> {
        Ok(SearchIndexClient {
            inner: SearchClient::with_options(parse_options(options)?.unwrap_or_default()),
        })
    }

    /// Call right before starting the fetch. Throws if a load already started.
    #[wasm_bindgen(js_name = beginLoad)]
    pub fn begin_load(&mut self) -> Result<(), JsValue> {
        self.inner.begin_load().map_err(to_js_error)
    }

    /// Hand over the HTTP status and body of the corpus response.
    #[wasm_bindgen(js_name = completeLoad)]
    pub fn complete_load(&mut self, status: u16, body: &[u8]) -> Result<(), JsValue> {
        self.inner
            .complete_load(FetchResponse {
                status,
                body: body.to_vec(),
            })
            .map_err(to_js_error)
    }

    /// Report a network error, abort, or timeout.
    #[wasm_bindgen(js_name = failLoad)]
    pub fn fail_load(&mut self, reason: String) -> Result<(), JsValue> {
        self.inner
            .fail_load(LoadError::Fetch(reason))
            .map_err(to_js_error)
    }

    /// "unloaded" | "loading" | "ready" | "failed"
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().name().to_string()
    }

    /// Number of posts in memory (0 unless ready).
    #[wasm_bindgen(js_name = docCount)]
    pub fn doc_count(&self) -> usize {
        match self.inner.state() {
            LoadState::Ready(index) => index.len(),
            _ => 0,
        }
    }

    /// Run a query against the in-memory corpus.
    ///
    /// Returns `{results: [{title, url, date, categories}], status, available, reason}`.
    /// Throws on malformed options.
    #[wasm_bindgen]
    pub fn query(&self, query: &str, options: Option<JsValue>) -> Result<JsValue, JsValue> {
        let options = parse_options(options)?.unwrap_or_else(|| self.inner.options().clone());
        let response = self.inner.query_with_options(query, &options);

        let (status, reason) = match &response.status {
            QueryStatus::Pending => ("pending", None),
            QueryStatus::Ready => ("ready", None),
            QueryStatus::Unavailable { reason } => ("unavailable", Some(reason.clone())),
        };

        let output = QueryOutput {
            results: response
                .results
                .iter()
                .map(|post| SearchResultOutput {
                    title: &post.title,
                    url: &post.url,
                    date: &post.date,
                    categories: &post.categories,
                })
                .collect(),
            status,
            available: response.is_available(),
            reason,
        };

        to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
