// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the builder and the client.
//!
//! Only two things can actually stop work: a build whose inputs or output
//! directory are unusable (`BuildError`), and a client whose corpus never
//! arrived intact (`LoadError`). A single bad post is not an error at all.
//! It is a [`SkipReason`] recorded in the build report and logged.

use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a corpus build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest JSON in {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported manifest version {found} (expected {expected})")]
    ManifestVersion { found: u32, expected: u32 },

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize corpus: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a single post was left out of the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing title")]
    MissingTitle,

    #[error("missing url")]
    MissingUrl,

    #[error("duplicate url {0}")]
    DuplicateUrl(String),

    #[error("unreadable post file: {0}")]
    Unreadable(String),

    #[error("invalid post JSON: {0}")]
    InvalidJson(String),
}

/// A decoded corpus that violates its own schema.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus is not a JSON array of post records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate url {0} in corpus")]
    DuplicateUrl(String),
}

/// Why the client could not bring its corpus into memory.
///
/// Every variant puts the client in the failed state; the distinction only
/// matters for the message shown to the reader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("corpus fetch failed: {0}")]
    Fetch(String),

    #[error("corpus request returned HTTP {0}")]
    Status(u16),

    #[error("corpus fetch timed out after {0} ms")]
    Timeout(u64),

    #[error("corpus could not be parsed: {0}")]
    Parse(String),
}

impl From<CorpusError> for LoadError {
    fn from(err: CorpusError) -> Self {
        LoadError::Parse(err.to_string())
    }
}

/// Misuse of the client state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("corpus load already started (state: {0})")]
    AlreadyStarted(&'static str),

    #[error("no corpus load in flight (state: {0})")]
    NotLoading(&'static str),
}
