//! PROFILES stage: fold buyer rows into one profile per canonical name.
//!
//! Duplicate normalized names resolve last-wins (map insert), matching the
//! lookup-table semantics of the source system; callers that need
//! per-buyer uniqueness must pre-validate. Supplemental loads default to 0
//! for buyers absent from the control map.

use std::collections::BTreeMap;

use wd_core::{BuyerName, BuyerProfile};
use wd_io::buyers::BuyerRow;

/// Build the full profile set (eligible and ineligible alike).
pub fn build_buyer_profiles(
    rows: &[BuyerRow],
    control: &BTreeMap<BuyerName, u64>,
) -> BTreeMap<BuyerName, BuyerProfile> {
    let mut out = BTreeMap::new();
    for row in rows {
        let supplemental = control.get(&row.name).copied().unwrap_or(0);
        let profile = BuyerProfile::new(row.name.clone(), row.workload, supplemental);
        out.insert(row.name.clone(), profile);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wd_core::{Workload, DEFAULT_QUOTA, REDUCED_QUOTA};

    fn row(name: &str, production: u64) -> BuyerRow {
        BuyerRow {
            name: BuyerName::new(name).unwrap(),
            workload: Workload { production_total: production, ..Workload::default() },
        }
    }

    #[test]
    fn last_row_wins_per_normalized_name() {
        let rows = vec![row("Ana", 10), row(" ANA ", 99)];
        let profiles = build_buyer_profiles(&rows, &BTreeMap::new());
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[&BuyerName::new("ana").unwrap()].workload.production_total, 99);
    }

    #[test]
    fn supplemental_defaults_to_zero_and_feeds_the_quota() {
        let mut control = BTreeMap::new();
        control.insert(BuyerName::new("bia").unwrap(), 120u64);

        let profiles = build_buyer_profiles(&[row("ana", 0), row("bia", 0)], &control);
        let ana = &profiles[&BuyerName::new("ana").unwrap()];
        let bia = &profiles[&BuyerName::new("bia").unwrap()];
        assert_eq!(ana.supplemental, 0);
        assert_eq!(ana.target_quota, DEFAULT_QUOTA);
        assert_eq!(bia.supplemental, 120);
        assert_eq!(bia.target_quota, REDUCED_QUOTA);
    }
}
