//! Text renderer: fixed-width table plus the shortfall summary sentence.
//! Operator convenience for the CLI; the JSON renderer is the export
//! contract.

use wd_core::tenths::format_tenths;
use wd_core::SUFFICIENCY_TARGET;

use crate::structure::ReportModel;

const HEADERS: [&str; 12] = [
    "BUYER", "ITEMS", "PDT", "QIC", "QIC TOT", "GMP", "GMP TOT", "TMC", "QEP", "TGI", "DEV",
    "GROUPINGS",
];

/// Render the model as an aligned table with a trailing summary.
pub fn render_text(model: &ReportModel) -> String {
    let mut cells: Vec<[String; 12]> = Vec::with_capacity(model.rows.len());
    for r in &model.rows {
        cells.push([
            r.buyer.as_str().to_string(),
            r.items_assigned.to_string(),
            r.production_base.to_string(),
            r.pending_base.to_string(),
            r.pending_total.to_string(),
            r.in_progress_base.to_string(),
            r.in_progress_total.to_string(),
            format_tenths(r.avg_cycle_tenths),
            r.supplemental.to_string(),
            r.gauge_index.to_string(),
            r.deviation.to_string(),
            r.assigned_joined(),
        ]);
    }

    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, row: &[String]| {
        let joined = row
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{c:<width$}", width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(joined.trim_end());
        out.push('\n');
    };

    line(&mut out, &HEADERS.map(String::from));
    for row in &cells {
        line(&mut out, row);
    }

    out.push('\n');
    if model.summary.missing_to_target > 0 {
        out.push_str(&format!(
            "{} items short of the {SUFFICIENCY_TARGET}-unit target across all buyers.\n",
            model.summary.missing_to_target
        ));
    } else {
        out.push_str(&format!("All buyers at or above the {SUFFICIENCY_TARGET}-unit target.\n"));
    }
    if !model.summary.residual.is_empty() {
        let ids: Vec<&str> = model.summary.residual.iter().map(|g| g.as_str()).collect();
        out.push_str(&format!("Unassigned groupings ({}): {}\n", ids.len(), ids.join(", ")));
    }
    for w in &model.provenance.warnings {
        out.push_str(&format!("warning: {w}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{Provenance, ReportRow, ReportSummary};
    use wd_core::{BuyerName, GroupingId};

    #[test]
    fn table_and_summary_lines() {
        let model = ReportModel {
            rows: vec![ReportRow {
                buyer: BuyerName::new("ana").unwrap(),
                assigned: vec![GroupingId::new("EA-1").unwrap()],
                items_assigned: 4,
                pending_base: 2,
                in_progress_base: 1,
                in_progress_total: 2,
                avg_cycle_tenths: 900,
                pending_total: 6,
                production_base: 3,
                supplemental: 0,
                gauge_index: 9,
                deviation: -111,
                eligible: true,
            }],
            summary: ReportSummary {
                missing_to_target: 111,
                residual: vec![GroupingId::new("PLAIN-9").unwrap()],
            },
            provenance: Provenance { warnings: vec!["control: x".into()], ..Default::default() },
        };
        let text = render_text(&model);
        assert!(text.starts_with("BUYER"));
        assert!(text.contains("ANA"));
        assert!(text.contains("90.0"));
        assert!(text.contains("111 items short of the 120-unit target"));
        assert!(text.contains("Unassigned groupings (1): PLAIN-9"));
        assert!(text.contains("warning: control: x"));
    }

    #[test]
    fn all_at_target_sentence() {
        let model = ReportModel::default();
        let text = render_text(&model);
        assert!(text.contains("All buyers at or above the 120-unit target."));
    }
}
