//! Tests for manifest reading.

use crate::common::fixture;
use gleaner::{read_manifest, BuildError};
use tempfile::TempDir;

#[test]
fn test_read_valid_manifest_keeps_order() {
    let manifest = read_manifest(&fixture("valid")).unwrap();
    assert_eq!(manifest.version, 1);
    assert_eq!(
        manifest.posts,
        vec![
            "2019-03-04-docker-registry.json",
            "2018-06-02-abstract-factory.json",
            "2017-11-20-notes-on-rust.json",
        ]
    );
}

#[test]
fn test_missing_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let err = read_manifest(temp_dir.path()).unwrap_err();
    assert!(matches!(err, BuildError::ManifestRead { .. }));
    assert!(
        err.to_string().contains("manifest.json"),
        "Error should name the manifest: {}",
        err
    );
}

#[test]
fn test_invalid_manifest_json() {
    let err = read_manifest(&fixture("invalid-manifest")).unwrap_err();
    assert!(matches!(err, BuildError::ManifestParse { .. }), "{:?}", err);
}

#[test]
fn test_unsupported_manifest_version() {
    let err = read_manifest(&fixture("future-version")).unwrap_err();
    assert!(matches!(
        err,
        BuildError::ManifestVersion {
            found: 2,
            expected: 1
        }
    ));
}
