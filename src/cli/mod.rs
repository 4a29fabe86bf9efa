// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the gleaner command-line interface.
//!
//! Three subcommands: `index` builds `search.json` from a directory of posts,
//! `inspect` summarizes an existing artifact, and `search` loads an artifact
//! (from disk or over HTTP) through the same client the browser uses and runs
//! one query against it.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "gleaner",
    about = "Search corpus builder and query tool for static blogs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build search.json from a directory of post JSON files
    Index {
        /// Input directory containing manifest.json and post files
        #[arg(short, long, env = "GLEANER_INPUT")]
        input: PathBuf,

        /// Output directory for search.json
        #[arg(short, long, env = "GLEANER_OUTPUT")]
        output: PathBuf,

        /// Indent the artifact (larger, but readable when debugging)
        #[arg(long)]
        pretty: bool,

        /// Treat post bodies as plain text instead of HTML
        #[arg(long)]
        plain: bool,

        /// Hide progress bars
        #[arg(short, long)]
        quiet: bool,
    },

    /// Summarize a search.json artifact
    Inspect {
        /// Path to search.json
        file: PathBuf,
    },

    /// Load a corpus and run one query against it
    Search {
        /// Path or http(s) URL of search.json
        source: String,

        /// Search query (case-insensitive substring)
        query: String,

        /// Maximum number of results to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Seconds to wait for an HTTP corpus before giving up
        #[arg(long, default_value = "10")]
        timeout: u64,
    },
}
