//! Where the client gets its corpus bytes from.
//!
//! A source performs exactly one fetch per call and reports what it got. It
//! does not parse anything: status checks and JSON decoding belong to the
//! client so every source fails the same way.

use std::path::PathBuf;
#[cfg(feature = "http")]
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LoadError;

/// Raw result of one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP-style status. Non-HTTP sources report 200 for success.
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        FetchResponse {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can produce the corpus artifact.
///
/// Implementations enforce their own timeout and report expiry as
/// [`LoadError::Timeout`].
#[async_trait]
pub trait CorpusSource: Send + Sync {
    async fn fetch(&self) -> Result<FetchResponse, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// A corpus artifact on the local filesystem.
///
/// With the `tokio` feature the read goes through `tokio::fs` and must be
/// awaited inside a tokio runtime. Without it the read is a plain blocking
/// `std::fs::read`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait]
impl CorpusSource for FileSource {
    async fn fetch(&self) -> Result<FetchResponse, LoadError> {
        #[cfg(feature = "tokio")]
        let bytes = tokio::fs::read(&self.path).await;
        #[cfg(not(feature = "tokio"))]
        let bytes = std::fs::read(&self.path);

        bytes
            .map(FetchResponse::ok)
            .map_err(|e| LoadError::Fetch(format!("{}: {}", self.path.display(), e)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A fixed response, handy for tests and for corpora embedded in a binary.
#[derive(Debug, Clone)]
pub struct MemorySource {
    response: Result<FetchResponse, LoadError>,
}

impl MemorySource {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        MemorySource {
            response: Ok(FetchResponse::ok(body)),
        }
    }

    pub fn status(status: u16) -> Self {
        MemorySource {
            response: Ok(FetchResponse {
                status,
                body: Vec::new(),
            }),
        }
    }

    pub fn error(error: LoadError) -> Self {
        MemorySource {
            response: Err(error),
        }
    }
}

#[async_trait]
impl CorpusSource for MemorySource {
    async fn fetch(&self) -> Result<FetchResponse, LoadError> {
        self.response.clone()
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// The corpus artifact served over HTTP.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, LoadError> {
        let builder = reqwest::Client::builder()
            .user_agent(concat!("gleaner/", env!("CARGO_PKG_VERSION")));
        Self::with_client(url, timeout, builder)
    }

    /// Build from a caller-configured client builder (proxies, TLS roots).
    /// The timeout is always applied on top.
    pub fn with_client(
        url: impl Into<String>,
        timeout: Duration,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, LoadError> {
        let client = builder
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Fetch(e.to_string()))?;
        Ok(HttpSource {
            url: url.into(),
            timeout,
            client,
        })
    }

    fn map_error(&self, err: reqwest::Error) -> LoadError {
        if err.is_timeout() {
            LoadError::Timeout(self.timeout.as_millis() as u64)
        } else {
            LoadError::Fetch(err.to_string())
        }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CorpusSource for HttpSource {
    async fn fetch(&self) -> Result<FetchResponse, LoadError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;
        Ok(FetchResponse {
            status,
            body: body.to_vec(),
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
