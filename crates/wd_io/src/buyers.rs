//! Buyer dataset loader.
//!
//! One row per buyer with five required columns. A missing column is fatal
//! for the run; rows without a buyer name are dropped; numeric cells
//! default to 0. Duplicate normalized names are NOT deduplicated here —
//! the profile builder's map insert makes the last row win.

use wd_core::tenths::{count_from_f64, tenths_from_f64};
use wd_core::{BuyerName, Workload};

use crate::table::{cell_display, cell_number, Table};
use crate::IoResult;

pub const DATASET: &str = "buyers";

pub const COL_BUYER: &str = "COMPRADOR";
pub const COL_PRODUCTION: &str = "PRODUCAO QTD. ITENS TOTAL";
pub const COL_PENDING: &str = "QTD. RC_ITEM";
pub const COL_CYCLE: &str = "TMC GMP";
pub const COL_IN_PROGRESS: &str = "QTD. GMP EM ANDAMENTO";

pub const REQUIRED: [&str; 5] =
    [COL_BUYER, COL_PRODUCTION, COL_PENDING, COL_CYCLE, COL_IN_PROGRESS];

/// One buyer row after normalization and numeric coercion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuyerRow {
    pub name: BuyerName,
    pub workload: Workload,
}

/// Validate the schema and extract the typed rows, in input order.
pub fn buyer_rows(table: &Table) -> IoResult<Vec<BuyerRow>> {
    for col in REQUIRED {
        table.require_column(col)?;
    }

    let mut out = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let raw_name = match cell_display(row, COL_BUYER) {
            Some(s) => s,
            None => continue, // null buyer name: row dropped
        };
        let name = match BuyerName::new(&raw_name) {
            Some(n) => n,
            None => continue, // blank after normalization
        };
        out.push(BuyerRow {
            name,
            workload: Workload {
                production_total: count_from_f64(cell_number(row, COL_PRODUCTION)),
                pending_items: count_from_f64(cell_number(row, COL_PENDING)),
                avg_cycle_tenths: tenths_from_f64(cell_number(row, COL_CYCLE)),
                in_progress: count_from_f64(cell_number(row, COL_IN_PROGRESS)),
            },
        });
    }
    Ok(out)
}
