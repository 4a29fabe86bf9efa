// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that travel from the site build to the browser.
//!
//! A [`Corpus`] is an ordered list of [`PostRecord`]s, serialized as a bare
//! JSON array. There is no header or version field: the builder and the client
//! agree on the five record fields and nothing else.
//!
//! # Invariants
//!
//! - **Corpus**: every `url` appears at most once. `Corpus::new` and
//!   `Corpus::from_json` reject violations, the builder never produces them.
//! - **PostRecord**: `title` and `url` are non-empty in anything the builder
//!   emits. The client does not re-check this; a blank title just never matches.
//! - Corpus order is the site's post order. Nothing in this crate sorts it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CorpusError;

/// One published post, as stored in the corpus artifact.
///
/// Field order here is the field order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub url: String,
    /// `YYYY-MM-DD`, or empty when the source date was unusable. Display only.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Post body with all markup stripped.
    #[serde(default)]
    pub content: String,
}

/// The full, ordered set of searchable posts for one site build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Corpus {
    posts: Vec<PostRecord>,
}

impl Corpus {
    /// Wrap a list of records, rejecting duplicate urls.
    pub fn new(posts: Vec<PostRecord>) -> Result<Self, CorpusError> {
        let mut seen = HashSet::with_capacity(posts.len());
        for post in &posts {
            if !seen.insert(post.url.as_str()) {
                return Err(CorpusError::DuplicateUrl(post.url.clone()));
            }
        }
        Ok(Corpus { posts })
    }

    /// Caller guarantees url uniqueness (the builder dedups as it assembles).
    pub(crate) fn from_unique(posts: Vec<PostRecord>) -> Self {
        debug_assert!(Corpus::new(posts.clone()).is_ok());
        Corpus { posts }
    }

    /// Decode a corpus artifact.
    pub fn from_json(bytes: &[u8]) -> Result<Self, CorpusError> {
        let posts: Vec<PostRecord> = serde_json::from_slice(bytes)?;
        Corpus::new(posts)
    }

    /// Encode as the on-disk artifact.
    ///
    /// Output depends only on the records, so equal corpora encode to equal bytes.
    pub fn to_json(&self, pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
        if pretty {
            serde_json::to_vec_pretty(&self.posts)
        } else {
            serde_json::to_vec(&self.posts)
        }
    }

    pub fn posts(&self) -> &[PostRecord] {
        &self.posts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostRecord> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, url: &str) -> Option<&PostRecord> {
        self.posts.iter().find(|p| p.url == url)
    }

    pub fn into_posts(self) -> Vec<PostRecord> {
        self.posts
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a PostRecord;
    type IntoIter = std::slice::Iter<'a, PostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// Query-time knobs. Everything defaults to the plain behavior: no cap.
///
/// Unknown keys are rejected so a misspelled option fails loudly instead of
/// quietly meaning "no options".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    /// Keep at most this many matches (the first ones in corpus order).
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        SearchOptions { limit: Some(limit) }
    }
}
