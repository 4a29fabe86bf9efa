//! Custom cargo commands for gleaner.
//!
//! Usage:
//!   cargo xtask verify      - Run full verification suite
//!   cargo xtask test        - Run all tests
//!   cargo xtask check       - Quick check (check + test + clippy)
//!   cargo xtask bench       - Run benchmarks
//!   cargo xtask wasm        - Build the browser bindings
//!   cargo xtask fuzz <T>    - Fuzz one target for a minute (nightly)

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Fixture directory the end-to-end check indexes
const E2E_INPUT: &str = "data/build-fixtures/valid";

/// Scratch space for end-to-end output
const E2E_OUTPUT: &str = "target/e2e";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let task = args.next();
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("wasm") => wasm()?,
        Some("fuzz") => fuzz(args.next().as_deref())?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify      Run full verification suite (tests + clippy + wasm + e2e)
  test        Run all Rust tests
  check       Quick check (cargo check + test + clippy)
  bench       Run benchmarks
  wasm        Build browser bindings for wasm32-unknown-unknown
  fuzz <T>    Run fuzz target T for 60 seconds (needs cargo-fuzz, nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("gleaner Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[2/5] Running tests without default features...");
    run_cargo(&["test", "--quiet", "--lib", "--no-default-features"])?;
    println!("✓ Core builds and passes on its own\n");

    println!("[3/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/5] Building WASM bindings...");
    wasm()?;
    println!("✓ WASM bindings build\n");

    println!("[5/5] Indexing fixtures end to end...");
    e2e()?;
    println!("✓ Artifact is reproducible and searchable\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");
    println!("\nSafe to commit changes.");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

/// Build the wasm feature for the browser target
fn wasm() -> Result<()> {
    run_cargo(&[
        "build",
        "--release",
        "--lib",
        "--target",
        "wasm32-unknown-unknown",
        "--no-default-features",
        "--features",
        "wasm",
    ])
}

/// Run one fuzz target for a bounded time
fn fuzz(target: Option<&str>) -> Result<()> {
    let Some(target) = target else {
        bail!("usage: cargo xtask fuzz <corpus_parsing|query_matching|html_stripping>");
    };
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(["+nightly", "fuzz", "run", target, "--", "-max_total_time=60"])
        .current_dir(&root)
        .status()
        .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;

    if !status.success() {
        bail!("fuzz target {} failed", target);
    }
    Ok(())
}

/// Index the fixtures twice with the real binary and compare outputs.
fn e2e() -> Result<()> {
    let root = project_root()?;
    let first = root.join(E2E_OUTPUT).join("first");
    let second = root.join(E2E_OUTPUT).join("second");

    for out in [&first, &second] {
        if out.exists() {
            fs::remove_dir_all(out).with_context(|| format!("Failed to clean {}", out.display()))?;
        }
        run_gleaner(&["index", "--quiet", "-i", E2E_INPUT, "-o", &path_arg(out)?])?;
    }

    let a = fs::read(first.join("search.json")).context("First artifact missing")?;
    let b = fs::read(second.join("search.json")).context("Second artifact missing")?;
    if a != b {
        bail!("search.json differs between two builds of the same input");
    }

    let artifact = path_arg(&first.join("search.json"))?;
    run_gleaner(&["inspect", &artifact])?;

    let output = Command::new("cargo")
        .args(["run", "--quiet", "--", "search", &artifact, "docker"])
        .current_dir(&root)
        .output()
        .context("Failed to run gleaner search")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() || !stdout.contains("Docker Registry") {
        bail!("expected a Docker Registry hit, got:\n{}", stdout);
    }

    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn path_arg(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .with_context(|| format!("Non UTF-8 path: {}", path.display()))
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn run_gleaner(args: &[&str]) -> Result<()> {
    let mut full = vec!["run", "--quiet", "--"];
    full.extend_from_slice(args);
    run_cargo(&full)
}
