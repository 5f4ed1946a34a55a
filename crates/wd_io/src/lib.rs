//! wd_io — ingestion layer for the WD engine.
//!
//! Reads local JSON snapshots of the three datasets (buyers, groupings,
//! control), canonicalizes headers and identifiers, validates required
//! columns, and returns typed rows for the pipeline. Also provides
//! canonical JSON bytes/writes and SHA-256 digests of the loaded inputs.
//! No network I/O anywhere.

#![forbid(unsafe_code)]

use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// Unified error for wd_io. Fatal conditions only; soft conditions are
/// collected as [`Warning`]s and never abort a run.
#[derive(Debug, Error)]
pub enum IoError {
    /// A required column is absent from the dataset schema.
    #[error("{dataset}: required column '{column}' not found")]
    MissingColumn { dataset: &'static str, column: String },

    /// The grouping dataset has no header containing the identifier marker.
    #[error("groupings: no column containing 'ACOMPANHAMENTO' found")]
    MissingGroupingColumn,

    /// Dataset is not a JSON array of row objects.
    #[error("{dataset}: expected a JSON array of row objects: {msg}")]
    Shape { dataset: &'static str, msg: String },

    /// Filesystem read failures.
    #[error("read error: {0}")]
    Read(String),

    /// Filesystem write failures (canonical report output).
    #[error("write error: {0}")]
    Write(String),

    /// JSON parse/serialize failures.
    #[error("json error: {0}")]
    Json(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json(e.to_string())
    }
}

/// Soft condition recorded while loading the optional control dataset.
/// Warnings are surfaced through `tracing` at emit time and echoed in the
/// run provenance; they never stop the run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// An optional filter column is absent; that filter was skipped.
    MissingFilterColumn { dataset: &'static str, column: &'static str },
    /// The quantity column is absent; all quantities contributed 0.
    MissingQuantityColumn { dataset: &'static str },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MissingFilterColumn { dataset, column } => {
                write!(f, "{dataset}: column '{column}' not found; filter skipped")
            }
            Warning::MissingQuantityColumn { dataset } => {
                write!(f, "{dataset}: quantity column not found; quantities default to 0")
            }
        }
    }
}

pub mod buyers;
pub mod canonical_json;
pub mod control;
pub mod groupings;
pub mod hasher;
pub mod loader;
pub mod table;
