//! `HttpSource` against a throwaway local server.

use std::time::Duration;

use crate::common::{scenario_corpus, urls};
use gleaner::{CorpusSource, HttpSource, LoadError, LoadState, QueryStatus, SearchClient};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve exactly one canned HTTP/1.1 response, optionally after a delay.
/// Returns the url to fetch.
async fn serve_once(status: &'static str, body: Vec<u8>, delay: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }

        tokio::time::sleep(delay).await;
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            body.len()
        );
        // The client may have hung up after a timeout
        let _ = stream.write_all(head.as_bytes()).await;
        let _ = stream.write_all(&body).await;
        let _ = stream.shutdown().await;
    });

    format!("http://{}/search.json", addr)
}

fn source(url: &str, timeout: Duration) -> HttpSource {
    HttpSource::with_client(url, timeout, reqwest::Client::builder().no_proxy()).unwrap()
}

#[tokio::test]
async fn test_http_success_loads_corpus() {
    let body = scenario_corpus().to_json(false).unwrap();
    let url = serve_once("200 OK", body, Duration::ZERO).await;

    let mut client = SearchClient::new();
    client.load(&source(&url, Duration::from_secs(5))).await.unwrap();

    assert!(client.is_ready());
    let response = client.query("docker");
    assert_eq!(response.status, QueryStatus::Ready);
    assert_eq!(urls(&response.results), vec!["/dr"]);
}

#[tokio::test]
async fn test_http_server_error_is_unavailable() {
    let url = serve_once("500 Internal Server Error", b"oops".to_vec(), Duration::ZERO).await;

    let raw = source(&url, Duration::from_secs(5)).fetch().await.unwrap();
    assert_eq!(raw.status, 500);
    assert!(!raw.is_success());

    let url = serve_once("500 Internal Server Error", b"oops".to_vec(), Duration::ZERO).await;
    let mut client = SearchClient::new();
    client.load(&source(&url, Duration::from_secs(5))).await.unwrap();

    assert_eq!(client.state(), &LoadState::Failed(LoadError::Status(500)));
    let response = client.query("docker");
    assert!(response.results.is_empty());
    assert!(!response.is_available());
    assert!(matches!(response.status, QueryStatus::Unavailable { .. }));
}

#[tokio::test]
async fn test_http_not_found_is_unavailable() {
    let url = serve_once("404 Not Found", Vec::new(), Duration::ZERO).await;
    let mut client = SearchClient::new();
    client.load(&source(&url, Duration::from_secs(5))).await.unwrap();

    assert_eq!(client.state(), &LoadState::Failed(LoadError::Status(404)));
}

#[tokio::test]
async fn test_http_slow_server_times_out() {
    let body = scenario_corpus().to_json(false).unwrap();
    let url = serve_once("200 OK", body, Duration::from_secs(3)).await;

    let mut client = SearchClient::new();
    client
        .load(&source(&url, Duration::from_millis(200)))
        .await
        .unwrap();

    assert_eq!(client.state(), &LoadState::Failed(LoadError::Timeout(200)));
    assert!(!client.query("docker").is_available());
}

#[tokio::test]
async fn test_http_connection_refused_is_fetch_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = source(&format!("http://{}/search.json", addr), Duration::from_secs(5))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Fetch(_)), "{:?}", err);
}
