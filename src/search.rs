// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case-insensitive substring search over an in-memory corpus.
//!
//! There is no index in the inverted-index sense. A query is lowercased and
//! checked for containment in each post's lowercased title and content, in
//! corpus order. At blog scale (hundreds of posts) a linear scan answers a
//! keystroke well inside a frame.
//!
//! # Contract
//!
//! - `""` matches nothing. Any other query, including whitespace, is a literal.
//! - A post matches iff the folded query is a substring of its folded title
//!   or folded content. Categories, url and date are not searched.
//! - Results keep corpus order and are never reordered or deduplicated.
//! - Same corpus, same query, same results.

use crate::types::{Corpus, PostRecord, SearchOptions};
use crate::utils::normalize;

/// Does `post` contain the already-folded query in its title or content?
///
/// Folds the post fields on every call. [`SearchIndex`] avoids that by
/// folding once at load time.
pub fn matches(post: &PostRecord, folded_query: &str) -> bool {
    !folded_query.is_empty()
        && (normalize(&post.title).contains(folded_query)
            || normalize(&post.content).contains(folded_query))
}

/// Scan `corpus` for `query` without building anything first.
pub fn search<'a>(corpus: &'a Corpus, query: &str) -> Vec<&'a PostRecord> {
    search_with_options(corpus, query, &SearchOptions::default())
}

/// [`search`] with an optional result cap.
pub fn search_with_options<'a>(
    corpus: &'a Corpus,
    query: &str,
    options: &SearchOptions,
) -> Vec<&'a PostRecord> {
    if query.is_empty() {
        return Vec::new();
    }
    let folded = normalize(query);
    let limit = options.limit.unwrap_or(usize::MAX);
    corpus
        .iter()
        .filter(|post| matches(post, &folded))
        .take(limit)
        .collect()
}

/// Lowercased copies of the searchable fields of one post.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FoldedPost {
    title: String,
    content: String,
}

impl FoldedPost {
    fn contains(&self, folded_query: &str) -> bool {
        self.title.contains(folded_query) || self.content.contains(folded_query)
    }
}

/// A corpus plus its case-folded fields, ready for repeated queries.
///
/// Immutable once built. The client holds exactly one of these after a
/// successful load and answers every keystroke from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    corpus: Corpus,
    folded: Vec<FoldedPost>,
}

impl SearchIndex {
    pub fn new(corpus: Corpus) -> Self {
        let folded = corpus
            .iter()
            .map(|post| FoldedPost {
                title: normalize(&post.title),
                content: normalize(&post.content),
            })
            .collect();
        SearchIndex { corpus, folded }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<&PostRecord> {
        self.search_with_options(query, &SearchOptions::default())
    }

    pub fn search_with_options(&self, query: &str, options: &SearchOptions) -> Vec<&PostRecord> {
        if query.is_empty() {
            return Vec::new();
        }
        let folded_query = normalize(query);
        let limit = options.limit.unwrap_or(usize::MAX);

        let results: Vec<&PostRecord> = self
            .corpus
            .iter()
            .zip(&self.folded)
            .filter(|(_, folded)| folded.contains(&folded_query))
            .map(|(post, _)| post)
            .take(limit)
            .collect();

        tracing::debug!(query, matches = results.len(), "query answered");
        results
    }
}

impl From<Corpus> for SearchIndex {
    fn from(corpus: Corpus) -> Self {
        SearchIndex::new(corpus)
    }
}
