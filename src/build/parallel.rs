// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel post loading and body stripping.
//!
//! The expensive parts of a corpus build are (1) reading and parsing one JSON
//! file per post and (2) stripping each rendered body down to text. Both are
//! independent per post, so Rayon's `par_iter()` does the work and
//! `collect()` hands the results back in input order, which is corpus order.
//!
//! Nothing here fails the build. A post that cannot be read or parsed comes
//! back as a [`SkipReason`] next to its file name.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs;
use std::path::Path;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;

use crate::error::SkipReason;
use crate::strip::MarkupStripper;
use crate::types::PostRecord;

use super::{InputManifest, SourcePost};

/// A post read from disk, or the reason it could not be.
#[derive(Debug, Clone)]
pub struct LoadedPost {
    /// File name as listed in the manifest
    pub source: String,
    pub post: Result<SourcePost, SkipReason>,
}

fn load_one(input_dir: &Path, filename: &str) -> LoadedPost {
    let path = input_dir.join(filename);
    let post = fs::read_to_string(&path)
        .map_err(|e| SkipReason::Unreadable(e.to_string()))
        .and_then(|content| {
            serde_json::from_str::<SourcePost>(&content)
                .map_err(|e| SkipReason::InvalidJson(e.to_string()))
        });
    LoadedPost {
        source: filename.to_string(),
        post,
    }
}

/// Load every post listed in the manifest, in manifest order.
#[cfg(feature = "parallel")]
pub fn load_posts(input_dir: &Path, manifest: &InputManifest) -> Vec<LoadedPost> {
    manifest
        .posts
        .par_iter()
        .map(|filename| load_one(input_dir, filename))
        .collect()
}

/// Load every post listed in the manifest, in manifest order.
#[cfg(not(feature = "parallel"))]
pub fn load_posts(input_dir: &Path, manifest: &InputManifest) -> Vec<LoadedPost> {
    manifest
        .posts
        .iter()
        .map(|filename| load_one(input_dir, filename))
        .collect()
}

/// Load posts in parallel with progress reporting.
#[cfg(feature = "parallel")]
pub fn load_posts_with_progress(
    input_dir: &Path,
    manifest: &InputManifest,
    progress: &ProgressBar,
) -> Vec<LoadedPost> {
    let counter = AtomicUsize::new(0);
    let total = manifest.posts.len();

    manifest
        .posts
        .par_iter()
        .map(|filename| {
            let loaded = load_one(input_dir, filename);

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            if count.is_multiple_of(10) || count == total {
                progress.set_message(format!("{}/{}", count, total));
            }

            loaded
        })
        .collect()
}

/// Turn source posts into records, stripping bodies in parallel.
///
/// Output order matches input order. Url uniqueness is checked afterwards,
/// sequentially, so "first occurrence wins" stays well defined.
#[cfg(feature = "parallel")]
pub fn strip_posts<S>(posts: &[SourcePost], stripper: &S) -> Vec<Result<PostRecord, SkipReason>>
where
    S: MarkupStripper + Sync + ?Sized,
{
    posts.par_iter().map(|post| post.to_record(stripper)).collect()
}

/// Turn source posts into records.
#[cfg(not(feature = "parallel"))]
pub fn strip_posts<S>(posts: &[SourcePost], stripper: &S) -> Vec<Result<PostRecord, SkipReason>>
where
    S: MarkupStripper + Sync + ?Sized,
{
    posts.iter().map(|post| post.to_record(stripper)).collect()
}

fn record_for<S>(loaded: &LoadedPost, stripper: &S) -> Result<PostRecord, SkipReason>
where
    S: MarkupStripper + ?Sized,
{
    match &loaded.post {
        Ok(post) => post.to_record(stripper),
        Err(reason) => Err(reason.clone()),
    }
}

/// [`strip_posts`] over loaded posts; load failures pass through in place.
#[cfg(feature = "parallel")]
pub fn strip_loaded_posts<S>(
    loaded: &[LoadedPost],
    stripper: &S,
) -> Vec<Result<PostRecord, SkipReason>>
where
    S: MarkupStripper + Sync + ?Sized,
{
    loaded.par_iter().map(|l| record_for(l, stripper)).collect()
}

/// [`strip_posts`] over loaded posts; load failures pass through in place.
#[cfg(not(feature = "parallel"))]
pub fn strip_loaded_posts<S>(
    loaded: &[LoadedPost],
    stripper: &S,
) -> Vec<Result<PostRecord, SkipReason>>
where
    S: MarkupStripper + Sync + ?Sized,
{
    loaded.iter().map(|l| record_for(l, stripper)).collect()
}
