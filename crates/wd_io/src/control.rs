//! Control dataset aggregation (optional input).
//!
//! Summarizes the secondary workload sheet into one supplemental quantity
//! per buyer. Rows are grouped by the responsible-party column (falling
//! back to the buyer column), filtered by the secondary-workload flag and
//! the cancellation marker, then their line quantities are summed.
//! Missing optional columns downgrade to warnings; only a missing
//! grouping key is fatal.

use std::collections::BTreeMap;

use wd_core::tenths::count_from_f64;
use wd_core::{normalize_text, BuyerName};

use crate::table::{cell_display, cell_is_blank, cell_number, Table};
use crate::{IoError, IoResult, Warning};

pub const DATASET: &str = "control";

pub const COL_CONTRACTOR: &str = "CONTRATADOR";
pub const COL_BUYER: &str = "COMPRADOR";
/// Non-blank cell here marks an active secondary workload; the row is excluded.
pub const COL_FLAG: &str = "GMP";
/// Cancellation marker is looked for in this column.
pub const COL_STATUS: &str = "EDITAL E GMC";
pub const COL_QUANTITY: &str = "QUANTIDADE DE LINHAS";

const CANCELLED_MARKER: &str = "CANCELADO";

/// Number of trailing characters the source system appends to the key
/// (a code suffix after the buyer name).
const KEY_SUFFIX_LEN: usize = 6;

/// Supplemental quantity per buyer. Warnings for skipped filters are
/// pushed onto `warnings`.
pub fn supplemental_map(
    table: &Table,
    warnings: &mut Vec<Warning>,
) -> IoResult<BTreeMap<BuyerName, u64>> {
    let key_col = if table.has_column(COL_CONTRACTOR) {
        COL_CONTRACTOR
    } else if table.has_column(COL_BUYER) {
        COL_BUYER
    } else {
        return Err(IoError::MissingColumn {
            dataset: DATASET,
            column: format!("{COL_CONTRACTOR}' nor '{COL_BUYER}"),
        });
    };

    let has_flag = table.has_column(COL_FLAG);
    if !has_flag {
        push_warning(warnings, Warning::MissingFilterColumn { dataset: DATASET, column: COL_FLAG });
    }
    let has_status = table.has_column(COL_STATUS);
    if !has_status {
        push_warning(
            warnings,
            Warning::MissingFilterColumn { dataset: DATASET, column: COL_STATUS },
        );
    }
    let has_quantity = table.has_column(COL_QUANTITY);
    if !has_quantity {
        push_warning(warnings, Warning::MissingQuantityColumn { dataset: DATASET });
    }

    let mut out: BTreeMap<BuyerName, u64> = BTreeMap::new();
    for row in table.rows() {
        if has_flag && !cell_is_blank(row, COL_FLAG) {
            continue;
        }
        if has_status {
            if let Some(status) = cell_display(row, COL_STATUS) {
                if normalize_text(&status).contains(CANCELLED_MARKER) {
                    continue;
                }
            }
        }

        let raw_key = match cell_display(row, key_col) {
            Some(s) => s,
            None => continue,
        };
        let name = match BuyerName::new(&strip_key_suffix(&normalize_text(&raw_key))) {
            Some(n) => n,
            None => continue, // key shorter than the suffix, or blank
        };

        let quantity = if has_quantity { count_from_f64(cell_number(row, COL_QUANTITY)) } else { 0 };
        *out.entry(name).or_insert(0) += quantity;
    }
    Ok(out)
}

/// Drop the trailing code suffix from a normalized key; empty when the key
/// is not longer than the suffix.
fn strip_key_suffix(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= KEY_SUFFIX_LEN {
        String::new()
    } else {
        chars[..chars.len() - KEY_SUFFIX_LEN].iter().collect()
    }
}

fn push_warning(warnings: &mut Vec<Warning>, w: Warning) {
    tracing::warn!("{w}");
    warnings.push(w);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(v: serde_json::Value) -> (BTreeMap<BuyerName, u64>, Vec<Warning>) {
        let t = Table::from_value(DATASET, &v).unwrap();
        let mut warnings = Vec::new();
        let map = supplemental_map(&t, &mut warnings).unwrap();
        (map, warnings)
    }

    #[test]
    fn sums_per_stripped_key() {
        // keys carry a 6-character code suffix appended to the name
        let (map, warnings) = run(json!([
            {"CONTRATADOR": "ANA-00123", "GMP": null, "EDITAL E GMC": "ok",
             "QUANTIDADE DE LINHAS": 10},
            {"CONTRATADOR": "ANA-00123", "GMP": "", "EDITAL E GMC": "ok",
             "QUANTIDADE DE LINHAS": "5"},
            {"CONTRATADOR": "BIA-00456", "GMP": null, "EDITAL E GMC": "ok",
             "QUANTIDADE DE LINHAS": null}
        ]));
        assert!(warnings.is_empty());
        assert_eq!(map.len(), 2);
        assert_eq!(map[&BuyerName::new("ANA").unwrap()], 15);
        assert_eq!(map[&BuyerName::new("BIA").unwrap()], 0);
    }

    #[test]
    fn flag_and_cancellation_filters() {
        let (map, _) = run(json!([
            {"CONTRATADOR": "ANA-00123", "GMP": 1, "EDITAL E GMC": "ok",
             "QUANTIDADE DE LINHAS": 10},
            {"CONTRATADOR": "ANA-00123", "GMP": null, "EDITAL E GMC": "Edital CANCELADO",
             "QUANTIDADE DE LINHAS": 10},
            {"CONTRATADOR": "ANA-00123", "GMP": null, "EDITAL E GMC": "cancelado",
             "QUANTIDADE DE LINHAS": 10},
            {"CONTRATADOR": "ANA-00123", "GMP": null, "EDITAL E GMC": "publicado",
             "QUANTIDADE DE LINHAS": 7}
        ]));
        assert_eq!(map[&BuyerName::new("ANA").unwrap()], 7);
    }

    #[test]
    fn falls_back_to_buyer_column_and_warns_on_missing_filters() {
        let (map, warnings) = run(json!([
            {"COMPRADOR": "CARLA-00789", "QUANTIDADE DE LINHAS": 3}
        ]));
        assert_eq!(map[&BuyerName::new("CARLA").unwrap()], 3);
        assert_eq!(warnings.len(), 2);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::MissingFilterColumn { column: COL_FLAG, .. })));
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::MissingFilterColumn { column: COL_STATUS, .. })));
    }

    #[test]
    fn missing_quantity_column_warns_and_zeroes() {
        let (map, warnings) = run(json!([
            {"CONTRATADOR": "DORA-00012", "GMP": null, "EDITAL E GMC": "ok"}
        ]));
        assert_eq!(map[&BuyerName::new("DORA").unwrap()], 0);
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::MissingQuantityColumn { .. })));
    }

    #[test]
    fn neither_key_column_is_fatal() {
        let t = Table::from_value(DATASET, &json!([{"OUTRA": 1}])).unwrap();
        let mut warnings = Vec::new();
        assert!(matches!(
            supplemental_map(&t, &mut warnings),
            Err(IoError::MissingColumn { dataset: DATASET, .. })
        ));
    }

    #[test]
    fn short_keys_vanish_with_the_suffix() {
        let (map, _) = run(json!([
            {"CONTRATADOR": "X-0012", "GMP": null, "EDITAL E GMC": "ok",
             "QUANTIDADE DE LINHAS": 9}
        ]));
        assert!(map.is_empty());
    }
}
