// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus builder.
//!
//! Runs once per site build. Takes the site's posts in site order, strips each
//! body to plain text, and writes one JSON array to `<output>/search.json`.
//!
//! # Failure policy
//!
//! The build only fails when it cannot read its manifest or cannot write its
//! output. Anything wrong with an individual post (unreadable file, bad JSON,
//! missing title or url, url already taken) drops that post, logs a warning,
//! and shows up in [`BuildReport::skipped`]. One bad post never costs the site
//! its search.
//!
//! # Reproducibility
//!
//! Same posts in, same bytes out. Loading and stripping run in parallel but
//! results are collected in input order, records carry no timestamps, and
//! serialization follows struct field order.

pub mod manifest;
pub mod parallel;
pub mod post;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::error::{BuildError, SkipReason};
use crate::strip::MarkupStripper;
use crate::types::{Corpus, PostRecord};

pub use manifest::*;
pub use parallel::*;
pub use post::*;

/// File name of the corpus artifact, relative to the site root.
pub const CORPUS_ARTIFACT: &str = "search.json";

/// Knobs for [`run_build`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Indent the artifact. Larger, but diffable.
    pub pretty: bool,
    /// Draw progress bars on stderr (only with the `parallel` feature).
    pub progress: bool,
}

/// A post that did not make it into the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPost {
    /// Manifest file name, or `post #N` for in-memory input
    pub source: String,
    pub reason: SkipReason,
}

/// Output of corpus assembly, before anything touches disk.
#[derive(Debug, Clone)]
pub struct AssembledCorpus {
    pub corpus: Corpus,
    pub skipped: Vec<SkippedPost>,
}

/// What was written, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
    pub path: PathBuf,
    pub bytes: usize,
    /// CRC32 of the artifact bytes
    pub checksum: u32,
}

/// Summary of a finished build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub records: usize,
    pub skipped: Vec<SkippedPost>,
    pub artifact: ArtifactInfo,
}

/// Create a progress style for the build progress bars
#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|style| style.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Build a corpus from in-memory posts.
///
/// This is the entry point for site generators that already hold their posts;
/// [`run_build`] is the same pipeline fed from a directory.
pub fn build_corpus<S>(posts: &[SourcePost], stripper: &S) -> AssembledCorpus
where
    S: MarkupStripper + Sync + ?Sized,
{
    let sources = (0..posts.len()).map(|i| format!("post #{}", i)).collect();
    assemble(sources, strip_posts(posts, stripper))
}

/// Pair results with their sources, enforce url uniqueness, log skips.
fn assemble(sources: Vec<String>, results: Vec<Result<PostRecord, SkipReason>>) -> AssembledCorpus {
    let mut seen: HashSet<String> = HashSet::with_capacity(results.len());
    let mut records = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();

    for (source, result) in sources.into_iter().zip(results) {
        let outcome = result.and_then(|record| {
            if seen.insert(record.url.clone()) {
                Ok(record)
            } else {
                Err(SkipReason::DuplicateUrl(record.url))
            }
        });

        match outcome {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::warn!(source = %source, reason = %reason, "skipping post");
                skipped.push(SkippedPost { source, reason });
            }
        }
    }

    AssembledCorpus {
        corpus: Corpus::from_unique(records),
        skipped,
    }
}

/// Serialize `corpus` to `<output_dir>/search.json`.
pub fn write_corpus(
    corpus: &Corpus,
    output_dir: &Path,
    pretty: bool,
) -> Result<ArtifactInfo, BuildError> {
    fs::create_dir_all(output_dir).map_err(|source| BuildError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let bytes = corpus.to_json(pretty)?;
    let path = output_dir.join(CORPUS_ARTIFACT);
    fs::write(&path, &bytes).map_err(|source| BuildError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(ArtifactInfo {
        path,
        bytes: bytes.len(),
        checksum: crc32fast::hash(&bytes),
    })
}

/// Read `manifest.json` from `input_dir`.
pub fn read_manifest(input_dir: &Path) -> Result<InputManifest, BuildError> {
    let path = input_dir.join("manifest.json");
    let content = fs::read_to_string(&path).map_err(|source| BuildError::ManifestRead {
        path: path.clone(),
        source,
    })?;
    let manifest: InputManifest = serde_json::from_str(&content)
        .map_err(|source| BuildError::ManifestParse { path, source })?;

    if manifest.version != MANIFEST_VERSION {
        return Err(BuildError::ManifestVersion {
            found: manifest.version,
            expected: MANIFEST_VERSION,
        });
    }
    Ok(manifest)
}

/// Full build: manifest → posts → corpus → `search.json`.
pub fn run_build<S>(
    input_dir: &Path,
    output_dir: &Path,
    options: &BuildOptions,
    stripper: &S,
) -> Result<BuildReport, BuildError>
where
    S: MarkupStripper + Sync + ?Sized,
{
    // 1. Read manifest
    let manifest = read_manifest(input_dir)?;

    // 2. Load posts in parallel
    #[cfg(feature = "parallel")]
    let loaded = {
        let multi = MultiProgress::new();
        let load_pb = if options.progress {
            multi.add(ProgressBar::new(manifest.posts.len() as u64))
        } else {
            ProgressBar::hidden()
        };
        load_pb.set_style(create_progress_style());
        load_pb.set_prefix("Loading");
        load_pb.set_message("posts...");

        let loaded = load_posts_with_progress(input_dir, &manifest, &load_pb);
        load_pb.finish_with_message(format!("loaded {} posts", loaded.len()));
        loaded
    };

    #[cfg(not(feature = "parallel"))]
    let loaded = load_posts(input_dir, &manifest);

    // 3. Strip bodies of everything that parsed
    let results = strip_loaded_posts(&loaded, stripper);
    let sources = loaded.into_iter().map(|l| l.source).collect();
    let assembled = assemble(sources, results);

    // 4. Write the artifact
    let artifact = write_corpus(&assembled.corpus, output_dir, options.pretty)?;

    tracing::info!(
        records = assembled.corpus.len(),
        skipped = assembled.skipped.len(),
        bytes = artifact.bytes,
        checksum = %format!("{:08x}", artifact.checksum),
        path = %artifact.path.display(),
        "corpus written"
    );

    Ok(BuildReport {
        records: assembled.corpus.len(),
        skipped: assembled.skipped,
        artifact,
    })
}
