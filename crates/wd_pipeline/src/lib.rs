//! wd_pipeline — deterministic pipeline surface
//! (load → validate → profiles → rank → allocate → consolidate).
//!
//! This crate stays I/O-free apart from delegating file loading to `wd_io`;
//! math lives in `wd_algo` and consolidation in `wd_report`. One run is a
//! pure function of its input snapshots: no ambient state, no clock, no
//! RNG, so it is safely callable from any concurrency model the host
//! chooses.

use std::collections::BTreeMap;
use std::path::Path;

use wd_algo::{allocate, rank_groupings, AllocationOutcome};
use wd_core::{BuyerName, BuyerProfile};
use wd_io::loader::{self, RunInputs};
use wd_report::{build_model, Provenance, ReportModel};

pub mod profiles;

pub use profiles::build_buyer_profiles;

/// Engine identifiers echoed into the report provenance.
#[derive(Debug, Clone)]
pub struct EngineMeta {
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Engine identifiers (baked by the build system in real deployments).
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        name: option_env!("WD_ENGINE_NAME").unwrap_or("wd_engine").to_string(),
        version: option_env!("WD_ENGINE_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        build: option_env!("WD_ENGINE_BUILD").unwrap_or("dev").to_string(),
    }
}

/// Single error surface for the pipeline orchestration. Fatal input errors
/// stop the run before any allocation is attempted.
#[derive(Debug)]
pub enum PipelineError {
    Io(wd_io::IoError),
}

impl core::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PipelineError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<wd_io::IoError> for PipelineError {
    fn from(e: wd_io::IoError) -> Self {
        PipelineError::Io(e)
    }
}

/// Top-level outputs of one batch run.
#[derive(Debug)]
pub struct RunOutcome {
    /// Consolidated per-buyer report (all buyers, eligible or not).
    pub report: ReportModel,
    /// Raw engine outcome (assignment sequences, final counters, residual).
    pub outcome: AllocationOutcome,
    /// Full profile set keyed by canonical buyer name.
    pub profiles: BTreeMap<BuyerName, BuyerProfile>,
}

/// Load the three datasets from disk and run the batch.
pub fn run_from_paths(
    buyers: &Path,
    groupings: &Path,
    control: Option<&Path>,
) -> Result<RunOutcome, PipelineError> {
    let inputs = loader::load_run_inputs(buyers, groupings, control)?;
    Ok(run_with_inputs(inputs, engine_identifiers()))
}

/// Run the batch over already-loaded inputs. Infallible: every fatal
/// condition is an input condition, raised by the loaders.
pub fn run_with_inputs(inputs: RunInputs, engine: EngineMeta) -> RunOutcome {
    // PROFILES: fold rows last-wins, attach supplemental loads.
    let profiles = build_buyer_profiles(&inputs.buyers, &inputs.control);

    // ELIGIBILITY GATE: the engine only ever sees eligible profiles.
    let eligible: BTreeMap<BuyerName, BuyerProfile> = profiles
        .iter()
        .filter(|(_, p)| p.eligible)
        .map(|(n, p)| (n.clone(), p.clone()))
        .collect();

    // RANK + ALLOCATE
    let ranked = rank_groupings(inputs.groupings);
    let outcome = allocate(&eligible, &ranked);

    // CONSOLIDATE
    let provenance = Provenance {
        engine_name: engine.name,
        engine_version: engine.version,
        engine_build: engine.build,
        buyers_sha256: inputs.digests.buyers_sha256,
        groupings_sha256: inputs.digests.groupings_sha256,
        control_sha256: inputs.digests.control_sha256,
        warnings: inputs.warnings.iter().map(|w| w.to_string()).collect(),
    };
    let report = build_model(&profiles, &outcome, provenance);

    RunOutcome { report, outcome, profiles }
}
