use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gleaner::{
    run_build, BuildOptions, ClientConfig, Corpus, CorpusSource, FileSource, HtmlStripper,
    HttpSource, PlainText, QueryStatus, SearchClient, SearchOptions,
};

mod cli;
use cli::display::{
    bold, dim, field, format_size, ok_line, row, section_bot, section_mid, section_top, url,
    warn_line,
};
use cli::{Cli, Commands};

/// How many categories `inspect` lists
const TOP_CATEGORIES: usize = 8;

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Index {
            input,
            output,
            pretty,
            plain,
            quiet,
        } => run_index(&input, &output, pretty, plain, quiet),
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Search {
            source,
            query,
            limit,
            timeout,
        } => run_search(&source, &query, limit, timeout),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr. `GLEANER_LOG` wins over `RUST_LOG`; default is warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("GLEANER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ═══════════════════════════════════════════════════════════════════════════
// INDEX
// ═══════════════════════════════════════════════════════════════════════════

fn run_index(input: &Path, output: &Path, pretty: bool, plain: bool, quiet: bool) -> Result<()> {
    let options = BuildOptions {
        pretty,
        progress: !quiet,
    };

    let report = if plain {
        run_build(input, output, &options, &PlainText)
    } else {
        run_build(input, output, &options, &HtmlStripper)
    }
    .with_context(|| format!("build from {} failed", input.display()))?;

    println!(
        "{}",
        ok_line(&format!(
            "{} ({} records, {})",
            report.artifact.path.display(),
            report.records,
            format_size(report.artifact.bytes)
        ))
    );
    println!("  {}", dim(&format!("crc32 {:08x}", report.artifact.checksum)));

    if !report.skipped.is_empty() {
        println!(
            "{}",
            warn_line(&format!("skipped {} post(s)", report.skipped.len()))
        );
        for skipped in &report.skipped {
            println!("  {} {}", dim(&skipped.source), skipped.reason);
        }
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

/// Aggregate numbers about an artifact.
#[derive(Debug, Default, PartialEq)]
struct CorpusStats {
    records: usize,
    content_chars: usize,
    undated: usize,
    earliest: Option<String>,
    latest: Option<String>,
    /// Most used first, ties by name
    categories: Vec<(String, usize)>,
}

impl CorpusStats {
    fn collect(corpus: &Corpus) -> Self {
        let mut stats = CorpusStats {
            records: corpus.len(),
            ..CorpusStats::default()
        };
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

        for post in corpus {
            stats.content_chars += post.content.chars().count();
            for category in &post.categories {
                *counts.entry(category.as_str()).or_default() += 1;
            }

            // Dates are normalized to YYYY-MM-DD, so string order is date order
            if post.date.is_empty() {
                stats.undated += 1;
                continue;
            }
            if stats.earliest.as_deref().is_none_or(|d| post.date.as_str() < d) {
                stats.earliest = Some(post.date.clone());
            }
            if stats.latest.as_deref().is_none_or(|d| post.date.as_str() > d) {
                stats.latest = Some(post.date.clone());
            }
        }

        let mut categories: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats.categories = categories;
        stats
    }
}

fn run_inspect(file: &Path) -> Result<()> {
    let bytes = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let corpus = Corpus::from_json(&bytes)
        .with_context(|| format!("{} is not a valid search corpus", file.display()))?;
    let stats = CorpusStats::collect(&corpus);

    section_top("ARTIFACT");
    row(&field("file", &file.display().to_string()));
    row(&field("size", &format_size(bytes.len())));
    row(&field("crc32", &format!("{:08x}", crc32fast::hash(&bytes))));

    section_mid("RECORDS");
    row(&field("posts", &stats.records.to_string()));
    row(&field("content", &format!("{} chars", stats.content_chars)));
    let range = match (&stats.earliest, &stats.latest) {
        (Some(first), Some(last)) => format!("{} → {}", first, last),
        _ => "-".to_string(),
    };
    row(&field("dates", &range));
    row(&field("undated", &stats.undated.to_string()));

    if !stats.categories.is_empty() {
        section_mid("CATEGORIES");
        for (name, count) in stats.categories.iter().take(TOP_CATEGORIES) {
            row(&field(name, &count.to_string()));
        }
        if stats.categories.len() > TOP_CATEGORIES {
            row(&dim(&format!(
                " … and {} more",
                stats.categories.len() - TOP_CATEGORIES
            )));
        }
    }
    section_bot();

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// SEARCH
// ═══════════════════════════════════════════════════════════════════════════

fn open_source(location: &str, timeout: Duration) -> Result<Box<dyn CorpusSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

fn run_search(location: &str, query: &str, limit: Option<usize>, timeout: u64) -> Result<()> {
    let config = ClientConfig {
        timeout: Duration::from_secs(timeout),
        options: SearchOptions { limit },
    };
    let source = open_source(location, config.timeout)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut client = SearchClient::with_options(config.options);
    runtime.block_on(client.load(source.as_ref()))?;

    let start = Instant::now();
    let response = client.query(query);
    let elapsed = start.elapsed();

    match &response.status {
        QueryStatus::Ready => {}
        QueryStatus::Unavailable { reason } => bail!("search unavailable: {}", reason),
        QueryStatus::Pending => bail!("corpus did not finish loading"),
    }

    if response.results.is_empty() {
        println!("No results for \"{}\"", query);
        return Ok(());
    }

    println!(
        "{} result(s) for \"{}\" {}",
        response.results.len(),
        query,
        dim(&format!("({:.2} ms)", elapsed.as_secs_f64() * 1000.0))
    );
    println!();
    for (i, post) in response.results.iter().enumerate() {
        println!("{:>3}. {}", i + 1, bold(&post.title));
        let mut meta = url(&post.url);
        if !post.date.is_empty() {
            meta.push_str(&format!("  {}", dim(&post.date)));
        }
        if !post.categories.is_empty() {
            meta.push_str(&format!("  {}", dim(&post.categories.join(", "))));
        }
        println!("     {}", meta);
    }

    Ok(())
}
