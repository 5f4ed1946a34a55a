//! Grouping ranking: descending by (priority weight, occurrence count).
//!
//! The sort is stable, so exact ties keep their first-seen input order.

use wd_core::GroupingRecord;

/// Rank groupings for assignment: heaviest weight first, then the most
/// occurrences.
pub fn rank_groupings(mut groupings: Vec<GroupingRecord>) -> Vec<GroupingRecord> {
    groupings.sort_by(|a, b| {
        (b.weight, b.occurrences).cmp(&(a.weight, a.occurrences))
    });
    groupings
}
