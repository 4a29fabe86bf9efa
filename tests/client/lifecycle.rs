//! Client load lifecycle against real artifacts.

use crate::common::{fixture, scenario_corpus, urls};
use gleaner::{
    run_build, BuildOptions, FileSource, HtmlStripper, LoadError, LoadState, MemorySource,
    QueryStatus, SearchClient, SearchOptions,
};
use tempfile::TempDir;

#[tokio::test]
async fn test_build_then_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let report = run_build(
        &fixture("valid"),
        temp_dir.path(),
        &BuildOptions::default(),
        &HtmlStripper,
    )
    .unwrap();

    let mut client = SearchClient::new();
    client.load(&FileSource::new(&report.artifact.path)).await.unwrap();
    assert!(client.is_ready());

    let response = client.query("REPOSITORY");
    assert_eq!(response.status, QueryStatus::Ready);
    assert_eq!(urls(&response.results), vec!["/2019/03/04/docker-registry/"]);
}

#[tokio::test]
async fn test_missing_artifact_is_unavailable_not_empty() {
    let temp_dir = TempDir::new().unwrap();
    let mut client = SearchClient::new();
    client
        .load(&FileSource::new(temp_dir.path().join("search.json")))
        .await
        .unwrap();

    assert!(matches!(client.state(), LoadState::Failed(LoadError::Fetch(_))));
    let response = client.query("docker");
    assert!(response.results.is_empty());
    assert!(!response.is_available());
}

#[tokio::test]
async fn test_server_error_scenario() {
    let mut client = SearchClient::new();
    client.load(&MemorySource::status(500)).await.unwrap();

    match client.query("docker").status {
        QueryStatus::Unavailable { reason } => assert!(reason.contains("500"), "{}", reason),
        other => panic!("expected unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_single_load_per_client() {
    let bytes = scenario_corpus().to_json(false).unwrap();
    let mut client = SearchClient::with_options(SearchOptions::with_limit(1));
    client.load(&MemorySource::ok(bytes.clone())).await.unwrap();

    assert!(client.load(&MemorySource::ok(bytes)).await.is_err());
    assert!(client.is_ready(), "a rejected second load leaves state alone");
    assert_eq!(client.query("r").results.len(), 1);
}
