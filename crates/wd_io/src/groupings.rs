//! Grouping dataset loader.
//!
//! The identifier column is discovered by marker (any header containing
//! `ACOMPANHAMENTO`). Identifiers are normalized, null rows dropped, and
//! duplicates folded into one [`GroupingRecord`] per distinct code with an
//! occurrence count, preserving first-seen order. Classification (weight,
//! kind) is stamped exactly once per record.

use std::collections::BTreeMap;

use wd_core::{GroupingId, GroupingRecord};

use crate::table::{cell_display, Table};
use crate::{IoError, IoResult};

pub const DATASET: &str = "groupings";

/// Marker that identifies the grouping-code column.
pub const IDENTIFIER_MARKER: &str = "ACOMPANHAMENTO";

/// Deduplicated grouping records in first-seen order.
pub fn grouping_records(table: &Table) -> IoResult<Vec<GroupingRecord>> {
    let column = table
        .find_column_containing(IDENTIFIER_MARKER)
        .ok_or(IoError::MissingGroupingColumn)?
        .to_string();

    let mut order: Vec<GroupingId> = Vec::new();
    let mut counts: BTreeMap<GroupingId, u64> = BTreeMap::new();
    for row in table.rows() {
        let raw = match cell_display(row, &column) {
            Some(s) => s,
            None => continue,
        };
        let id = match GroupingId::new(&raw) {
            Some(id) => id,
            None => continue,
        };
        match counts.get_mut(&id) {
            Some(n) => *n += 1,
            None => {
                counts.insert(id.clone(), 1);
                order.push(id);
            }
        }
    }

    Ok(order
        .into_iter()
        .map(|id| {
            let occurrences = counts[&id];
            GroupingRecord::classify(id, occurrences)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wd_core::GroupingKind;

    #[test]
    fn dedupes_counts_and_classifies() {
        let v = json!([
            {"Nº ACOMPANHAMENTO": "ea-001"},
            {"Nº ACOMPANHAMENTO": "EA-001 "},
            {"Nº ACOMPANHAMENTO": "PREG 5/24"},
            {"Nº ACOMPANHAMENTO": null},
            {"Nº ACOMPANHAMENTO": "PID-9"}
        ]);
        let t = Table::from_value(DATASET, &v).unwrap();
        let recs = grouping_records(&t).unwrap();
        assert_eq!(recs.len(), 3);

        assert_eq!(recs[0].id.as_str(), "EA-001");
        assert_eq!(recs[0].occurrences, 2);
        assert_eq!(recs[0].weight, 3);

        assert_eq!(recs[1].id.as_str(), "PREG 5/24");
        assert_eq!(recs[1].kind, GroupingKind::Auction);

        assert_eq!(recs[2].id.as_str(), "PID-9");
        assert_eq!(recs[2].weight, 2);
    }

    #[test]
    fn missing_identifier_column_is_fatal() {
        let v = json!([{"OUTRA COLUNA": "x"}]);
        let t = Table::from_value(DATASET, &v).unwrap();
        assert!(matches!(grouping_records(&t), Err(IoError::MissingGroupingColumn)));
    }
}
