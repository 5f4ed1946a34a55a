//! Report model: one consolidated record per buyer, an aggregate summary,
//! and run provenance.

use std::collections::BTreeMap;

use wd_algo::AllocationOutcome;
use wd_core::{BuyerName, BuyerProfile, GroupingId, SUFFICIENCY_TARGET};

/// One report record. Every buyer in the full input set gets a row; buyers
/// outside the eligible set, or never selected, carry zero assignments —
/// never an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportRow {
    pub buyer: BuyerName,
    /// Assigned grouping ids in assignment order.
    pub assigned: Vec<GroupingId>,
    /// Occurrence units allocated this run.
    pub items_assigned: u64,
    /// Raw pending-item count.
    pub pending_base: u64,
    /// Raw in-progress count.
    pub in_progress_base: u64,
    /// In-progress after assignment: each grouping counts as one process.
    pub in_progress_total: u64,
    /// Average cycle time in tenths (rendered at one decimal).
    pub avg_cycle_tenths: u64,
    /// Pending after assignment: base plus allocated units.
    pub pending_total: u64,
    /// Raw production count.
    pub production_base: u64,
    /// Supplemental quantity from the control dataset.
    pub supplemental: u64,
    /// Total gauge index: base load + allocated units + supplemental.
    pub gauge_index: u64,
    /// Signed distance from the sufficiency target.
    pub deviation: i64,
    pub eligible: bool,
}

impl ReportRow {
    /// Assigned ids joined for display.
    pub fn assigned_joined(&self) -> String {
        self.assigned.iter().map(GroupingId::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Aggregate view across all rows.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReportSummary {
    /// Units still needed for every buyer to reach the sufficiency target
    /// (sum of negative deviations, sign-flipped).
    pub missing_to_target: u64,
    /// Groupings nobody could take, in ranked order.
    pub residual: Vec<GroupingId>,
}

/// Run provenance: engine identity, input digests, soft warnings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Provenance {
    pub engine_name: String,
    pub engine_version: String,
    pub engine_build: String,
    pub buyers_sha256: String,
    pub groupings_sha256: String,
    pub control_sha256: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReportModel {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    pub provenance: Provenance,
}

/// Build the report from the full buyer set and the engine outcome (pure,
/// offline). Rows come out in canonical buyer order.
pub fn build_model(
    profiles: &BTreeMap<BuyerName, BuyerProfile>,
    outcome: &AllocationOutcome,
    provenance: Provenance,
) -> ReportModel {
    let mut rows = Vec::with_capacity(profiles.len());
    for (name, profile) in profiles {
        let assigned: Vec<GroupingId> = outcome.assigned(name).to_vec();
        let items_assigned = outcome.allocated(name);
        let gauge_index = profile.base_load() + items_assigned + profile.supplemental;
        rows.push(ReportRow {
            buyer: name.clone(),
            items_assigned,
            pending_base: profile.workload.pending_items,
            in_progress_base: profile.workload.in_progress,
            in_progress_total: profile.workload.in_progress + assigned.len() as u64,
            avg_cycle_tenths: profile.workload.avg_cycle_tenths,
            pending_total: profile.workload.pending_items + items_assigned,
            production_base: profile.workload.production_total,
            supplemental: profile.supplemental,
            gauge_index,
            deviation: gauge_index as i64 - SUFFICIENCY_TARGET as i64,
            eligible: profile.eligible,
            assigned,
        });
    }

    let missing_to_target = rows
        .iter()
        .filter(|r| r.deviation < 0)
        .map(|r| (-r.deviation) as u64)
        .sum();

    ReportModel {
        rows,
        summary: ReportSummary { missing_to_target, residual: outcome.residual.clone() },
        provenance,
    }
}
