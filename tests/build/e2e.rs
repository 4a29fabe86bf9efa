//! End-to-end tests for the build workflow.

use crate::common::{fixture, read_corpus};
use gleaner::{run_build, BuildError, BuildOptions, HtmlStripper, PlainText, CORPUS_ARTIFACT};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_run_build_e2e_basic() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("public");

    let result = run_build(
        &fixture("valid"),
        &output_path,
        &BuildOptions::default(),
        &HtmlStripper,
    );
    assert!(result.is_ok(), "Build should succeed: {:?}", result.err());
    let report = result.unwrap();

    assert_eq!(report.records, 3);
    assert!(report.skipped.is_empty());
    assert_eq!(report.artifact.path, output_path.join(CORPUS_ARTIFACT));
    assert!(report.artifact.path.exists(), "search.json should be created");

    let bytes = fs::read(&report.artifact.path).unwrap();
    assert_eq!(report.artifact.bytes, bytes.len());
    assert_eq!(report.artifact.checksum, crc32fast::hash(&bytes));
}

#[test]
fn test_run_build_e2e_records() {
    let temp_dir = TempDir::new().unwrap();
    let report = run_build(
        &fixture("valid"),
        temp_dir.path(),
        &BuildOptions::default(),
        &HtmlStripper,
    )
    .unwrap();
    let corpus = read_corpus(&report.artifact.path);

    // Manifest order, not date order
    let titles: Vec<_> = corpus.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Docker Registry", "Abstract Factory", "Notes on Rust"]);

    let docker = &corpus.posts()[0];
    assert_eq!(docker.url, "/2019/03/04/docker-registry/");
    assert_eq!(docker.date, "2019-03-04");
    assert_eq!(docker.categories, vec!["containers", "devops"]);
    assert!(docker.content.contains("Running a private image repository."));
    assert!(!docker.content.contains('<'), "markup should be stripped");
    assert!(!docker.content.contains("track"), "scripts should be dropped");

    let factory = &corpus.posts()[1];
    assert_eq!(factory.categories, vec!["patterns"]);
    assert!(factory.content.contains("databases & caches"));
    assert!(factory.content.contains("Factory::new()"));

    let notes = &corpus.posts()[2];
    assert_eq!(notes.date, "", "unparseable date should be blank");
    assert_eq!(notes.content, "ownership borrowing");
}

#[test]
fn test_run_build_e2e_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let options = BuildOptions::default();

    let a = run_build(&fixture("valid"), first.path(), &options, &HtmlStripper).unwrap();
    let b = run_build(&fixture("valid"), second.path(), &options, &HtmlStripper).unwrap();

    assert_eq!(a.artifact.checksum, b.artifact.checksum);
    assert_eq!(
        fs::read(&a.artifact.path).unwrap(),
        fs::read(&b.artifact.path).unwrap()
    );
}

#[test]
fn test_run_build_e2e_compact_field_order() {
    let temp_dir = TempDir::new().unwrap();
    let report = run_build(
        &fixture("valid"),
        temp_dir.path(),
        &BuildOptions::default(),
        &PlainText,
    )
    .unwrap();
    let text = fs::read_to_string(&report.artifact.path).unwrap();

    assert!(text.starts_with(r#"[{"title":"Docker Registry","url":"/2019/03/04/docker-registry/","date":"2019-03-04","categories":["containers","devops"],"content":""#));
    assert!(!text.contains('\n'), "compact output has no newlines");
}

#[test]
fn test_run_build_e2e_pretty() {
    let temp_dir = TempDir::new().unwrap();
    let options = BuildOptions {
        pretty: true,
        ..BuildOptions::default()
    };
    let report = run_build(&fixture("valid"), temp_dir.path(), &options, &HtmlStripper).unwrap();
    let text = fs::read_to_string(&report.artifact.path).unwrap();
    assert!(text.contains("\n  {"));
    assert_eq!(read_corpus(&report.artifact.path).len(), 3);
}

#[test]
fn test_run_build_e2e_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("output");

    let err = run_build(
        temp_dir.path(),
        &output_path,
        &BuildOptions::default(),
        &PlainText,
    )
    .unwrap_err();

    assert!(matches!(err, BuildError::ManifestRead { .. }));
    assert!(!output_path.exists(), "nothing should be written");
}

#[test]
fn test_run_build_e2e_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    // A file where the output directory should be
    let blocker = temp_dir.path().join("public");
    fs::write(&blocker, "not a directory").unwrap();

    let err = run_build(
        &fixture("valid"),
        &blocker,
        &BuildOptions::default(),
        &PlainText,
    )
    .unwrap_err();
    assert!(matches!(err, BuildError::OutputDir { .. }), "{:?}", err);
}

#[test]
fn test_run_build_e2e_typographic_entities() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(
        input.path().join("manifest.json"),
        r#"{"version": 1, "posts": ["cafe.json"]}"#,
    )
    .unwrap();
    fs::write(
        input.path().join("cafe.json"),
        r#"{"title": "Cafe Notes", "url": "/cafe/", "body": "<p>It&rsquo;s a caf&eacute; &mdash; caf&#233; caf&#xE9;</p>"}"#,
    )
    .unwrap();

    let report = run_build(
        input.path(),
        output.path(),
        &BuildOptions::default(),
        &HtmlStripper,
    )
    .unwrap();
    let corpus = read_corpus(&report.artifact.path);
    let post = &corpus.posts()[0];

    assert_eq!(post.content, "It\u{2019}s a café \u{2014} café café");
    assert!(!post.content.contains("rsquo"));
    assert!(!post.content.contains('&'));
}
