//! wd — offline CLI host for the batch engine.
//!
//! Wires exit codes, typed error mapping, the validate-only short-circuit,
//! and the full run path (load → pipeline → render → write).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Input validation failures (missing columns, dataset shape).
    pub const VALIDATION: i32 = 2;
    /// Filesystem failures (read/write/paths).
    pub const IO: i32 = 4;
    /// Engine/report failures.
    pub const ENGINE: i32 = 5;
}

use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Args};
use wd_pipeline::{run_from_paths, PipelineError, RunOutcome};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Dataset schema/shape failures.
    Validation(String),
    /// I/O errors (read/write/path).
    Io(String),
    /// Engine or rendering failures.
    Engine(String),
}

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("wd: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = if args.validate_only {
        match validate_only(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report_error(&e),
        }
    } else {
        match run_once(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report_error(&e),
        }
    };

    ExitCode::from(rc as u8)
}

/// Warnings from the loaders go to stderr through tracing.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .without_time()
        .try_init();
}

/// Validate-only path: load + column checks, no allocation.
fn validate_only(args: &Args) -> Result<(), MainError> {
    wd_io::loader::load_run_inputs(&args.buyers, &args.groupings, args.control.as_deref())
        .map_err(map_io_err)?;
    if !args.quiet {
        eprintln!("validate-only: inputs OK");
    }
    Ok(())
}

/// Full run path: pipeline → renderers → report.json.
fn run_once(args: &Args) -> Result<(), MainError> {
    let run: RunOutcome =
        run_from_paths(&args.buyers, &args.groupings, args.control.as_deref())
            .map_err(map_pipeline_err)?;

    for renderer in &args.render {
        match renderer.as_str() {
            "text" => {
                if !args.quiet {
                    print!("{}", wd_report::render_text(&run.report));
                }
            }
            "json" => {
                let value = wd_report::render_json(&run.report);
                let path = args.out.join("report.json");
                wd_io::canonical_json::write_canonical_file(&path, &value)
                    .map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
                if !args.quiet {
                    eprintln!("wrote {}", path.display());
                }
            }
            other => return Err(MainError::Engine(format!("unknown renderer: {other}"))),
        }
    }
    Ok(())
}

fn report_error(e: &MainError) -> i32 {
    use exitcodes::*;
    let (rc, msg) = match e {
        MainError::Validation(m) => (VALIDATION, m),
        MainError::Io(m) => (IO, m),
        MainError::Engine(m) => (ENGINE, m),
    };
    eprintln!("wd: error: {msg}");
    rc
}

/// Translate wd_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: wd_io::IoError) -> MainError {
    use wd_io::IoError::*;
    match e {
        MissingColumn { .. } | MissingGroupingColumn | Shape { .. } | Json(_) => {
            MainError::Validation(e.to_string())
        }
        Read(_) | Write(_) => MainError::Io(e.to_string()),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
    }
}
