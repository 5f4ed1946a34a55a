//! CLI argument surface: offline, deterministic.
//!
//! - No networked paths (reject any `scheme://`)
//! - Two required dataset paths, an optional control dataset
//! - Output: `--out` directory, `--render json|text`
//! - `--validate-only` loads and column-checks without running the engine

use std::path::{Path, PathBuf};

use clap::Parser;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "wd",
    disable_help_subcommand = true,
    about = "Offline, deterministic workload distributor for procurement groupings"
)]
pub struct Args {
    /// Buyer dataset JSON path (one row per buyer).
    #[arg(long)]
    pub buyers: PathBuf,

    /// Grouping dataset JSON path (one row per raw grouping occurrence).
    #[arg(long)]
    pub groupings: PathBuf,

    /// Control dataset JSON path (optional secondary workload sheet).
    #[arg(long)]
    pub control: Option<PathBuf>,

    /// Output directory for report.json (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Renderer(s) to emit. `text` prints to stdout, `json` writes
    /// report.json under --out. Defaults to `text`.
    #[arg(long, value_parser = ["json", "text"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// Load and validate inputs only; do not run the engine.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stdout output.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation. Messages are short and stable
/// (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://")
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn input_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [Some(args.buyers.as_path()), Some(args.groupings.as_path()), args.control.as_deref()]
        .into_iter()
        .flatten()
}

/// Parse the command line, then apply the offline-posture checks.
pub fn parse_and_validate() -> Result<Args, CliError> {
    let mut args = Args::parse();
    validate(&args)?;
    if args.render.is_empty() {
        args.render.push("text".to_string());
    }
    Ok(args)
}

fn validate(args: &Args) -> Result<(), CliError> {
    for p in input_paths(args).chain(std::iter::once(args.out.as_path())) {
        ensure_local_path(p)?;
    }
    for p in input_paths(args) {
        if !p.is_file() {
            return Err(CliError::NotFound(p.display().to_string()));
        }
    }
    Ok(())
}
