//! JSON renderer: the export contract of the run.
//!
//! Numbers are emitted at zero decimals except the average cycle time,
//! which renders as a one-decimal string from integer tenths. Callers
//! serialize the returned value with canonical key order (see
//! `wd_io::canonical_json`) when writing to disk.

use serde_json::{json, Value};
use wd_core::tenths::format_tenths;
use wd_core::GroupingId;

use crate::structure::ReportModel;

/// Render the model as a JSON value (deterministic given the model).
pub fn render_json(model: &ReportModel) -> Value {
    let rows: Vec<Value> = model
        .rows
        .iter()
        .map(|r| {
            json!({
                "buyer": r.buyer.as_str(),
                "assigned": r.assigned_joined(),
                "items_assigned": r.items_assigned,
                "pending_base": r.pending_base,
                "in_progress_base": r.in_progress_base,
                "in_progress_total": r.in_progress_total,
                "avg_cycle_time": format_tenths(r.avg_cycle_tenths),
                "pending_total": r.pending_total,
                "production_base": r.production_base,
                "supplemental": r.supplemental,
                "gauge_index": r.gauge_index,
                "deviation": r.deviation,
                "eligible": r.eligible,
            })
        })
        .collect();

    json!({
        "rows": rows,
        "summary": {
            "missing_to_target": model.summary.missing_to_target,
            "residual": model.summary.residual.iter().map(GroupingId::as_str).collect::<Vec<_>>(),
            "residual_count": model.summary.residual.len(),
        },
        "provenance": {
            "engine": {
                "name": model.provenance.engine_name,
                "version": model.provenance.engine_version,
                "build": model.provenance.engine_build,
            },
            "inputs": {
                "buyers_sha256": model.provenance.buyers_sha256,
                "groupings_sha256": model.provenance.groupings_sha256,
                "control_sha256": model.provenance.control_sha256,
            },
            "warnings": model.provenance.warnings,
        },
    })
}
