//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use crate::build::SourcePost;
use crate::types::{Corpus, PostRecord};

/// Create a corpus record with default date and no categories.
pub fn make_record(title: &str, url: &str, content: &str) -> PostRecord {
    PostRecord {
        title: title.to_string(),
        url: url.to_string(),
        date: "2020-01-01".to_string(),
        categories: vec![],
        content: content.to_string(),
    }
}

/// Create a build input post with an HTML body.
pub fn make_post(title: &str, url: &str, body: &str) -> SourcePost {
    SourcePost {
        title: Some(title.to_string()),
        url: Some(url.to_string()),
        date: Some("2020-01-01".to_string()),
        categories: vec![],
        body: body.to_string(),
    }
}

/// The two-post corpus used throughout the docs and tests.
pub fn scenario_corpus() -> Corpus {
    Corpus::new(vec![
        PostRecord {
            title: "Abstract Factory".to_string(),
            url: "/af".to_string(),
            date: "2018-06-02".to_string(),
            categories: vec!["patterns".to_string()],
            content: "factory pattern for databases".to_string(),
        },
        PostRecord {
            title: "Docker Registry".to_string(),
            url: "/dr".to_string(),
            date: "2019-03-04".to_string(),
            categories: vec!["containers".to_string()],
            content: "private image repository".to_string(),
        },
    ])
    .expect("scenario urls are unique")
}
