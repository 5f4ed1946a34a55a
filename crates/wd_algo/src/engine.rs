//! Greedy assignment of ranked groupings to eligible buyers.
//!
//! Single-pass, myopic balancer: each grouping goes to the candidate with
//! the largest current shortfall, consuming capacity proportional to the
//! grouping's occurrence count. No backtracking, no global optimization.
//!
//! Determinism:
//! - Buyers are scanned in canonical `BuyerName` order; the best candidate
//!   is replaced only on a strictly greater shortfall, so equal shortfalls
//!   resolve to the lexicographically smallest buyer.
//! - Capacity admits a buyer while `allocated < target_quota`; the
//!   occurrence-weighted increment may leave the final counter above the
//!   quota by at most `occurrences - 1` of the last admitted grouping.
//!   With unit occurrence counts, `allocated <= target_quota` holds
//!   strictly.

use std::collections::BTreeMap;

use wd_core::{BuyerName, BuyerProfile, GroupingId, GroupingRecord};

/// Per-buyer mutable state for one run. Single-owner table; there is no
/// concurrent access in the batch model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuyerState {
    pub profile: BuyerProfile,
    /// Occurrence units consumed so far.
    pub allocated: u64,
    /// Grouping ids in assignment order (audit trail).
    pub assigned: Vec<GroupingId>,
    /// Remaining distance below the sufficiency target; recomputed after
    /// every assignment, never negative, non-increasing.
    pub shortfall: u64,
}

impl BuyerState {
    fn new(profile: BuyerProfile) -> Self {
        let shortfall = profile.shortfall(0);
        Self { profile, allocated: 0, assigned: Vec::new(), shortfall }
    }

    fn has_capacity(&self) -> bool {
        self.allocated < self.profile.target_quota
    }
}

/// Engine output: final buyer states plus the groupings nobody could take.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllocationOutcome {
    pub states: BTreeMap<BuyerName, BuyerState>,
    /// Dropped groupings in ranked order — an expected outcome when demand
    /// exceeds total eligible capacity, not an error.
    pub residual: Vec<GroupingId>,
}

impl AllocationOutcome {
    /// Assignment sequence for one buyer; empty for unknown buyers.
    pub fn assigned(&self, buyer: &BuyerName) -> &[GroupingId] {
        self.states.get(buyer).map(|s| s.assigned.as_slice()).unwrap_or(&[])
    }

    /// Occurrence units consumed by one buyer; 0 for unknown buyers.
    pub fn allocated(&self, buyer: &BuyerName) -> u64 {
        self.states.get(buyer).map(|s| s.allocated).unwrap_or(0)
    }
}

/// Assign every ranked grouping to the eligible buyer with the largest
/// current shortfall, or drop it to the residual list when no buyer has
/// capacity left.
///
/// `eligible` must already be filtered to `eligible == true` profiles; the
/// engine never re-checks eligibility.
pub fn allocate(
    eligible: &BTreeMap<BuyerName, BuyerProfile>,
    ranked: &[GroupingRecord],
) -> AllocationOutcome {
    debug_assert!(eligible.values().all(|p| p.eligible), "caller must pre-filter eligibility");

    let mut states: BTreeMap<BuyerName, BuyerState> = eligible
        .iter()
        .map(|(name, profile)| (name.clone(), BuyerState::new(profile.clone())))
        .collect();
    let mut residual: Vec<GroupingId> = Vec::new();

    for grouping in ranked {
        let selected = select_max_shortfall(&states);
        match selected {
            None => residual.push(grouping.id.clone()),
            Some(name) => {
                let state = states.get_mut(&name).expect("selected buyer exists");
                state.assigned.push(grouping.id.clone());
                state.allocated += grouping.occurrences;
                state.shortfall = state.profile.shortfall(state.allocated);
            }
        }
    }

    AllocationOutcome { states, residual }
}

/// Candidate with the maximum current shortfall, scanning in canonical
/// buyer order and replacing only on strictly greater values.
fn select_max_shortfall(states: &BTreeMap<BuyerName, BuyerState>) -> Option<BuyerName> {
    let mut best: Option<(&BuyerName, u64)> = None;
    for (name, state) in states {
        if !state.has_capacity() {
            continue;
        }
        match best {
            None => best = Some((name, state.shortfall)),
            Some((_, best_shortfall)) if state.shortfall > best_shortfall => {
                best = Some((name, state.shortfall));
            }
            Some(_) => {}
        }
    }
    best.map(|(name, _)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wd_core::{Workload, DEFAULT_QUOTA};

    fn name(s: &str) -> BuyerName {
        BuyerName::new(s).unwrap()
    }

    fn profile(n: &str, production: u64, pending: u64, supplemental: u64) -> BuyerProfile {
        BuyerProfile::new(
            name(n),
            Workload { production_total: production, pending_items: pending, ..Workload::default() },
            supplemental,
        )
    }

    fn rec(id: &str, occurrences: u64) -> GroupingRecord {
        GroupingRecord::classify(GroupingId::new(id).unwrap(), occurrences)
    }

    fn eligible(profiles: Vec<BuyerProfile>) -> BTreeMap<BuyerName, BuyerProfile> {
        profiles.into_iter().map(|p| (p.name.clone(), p)).collect()
    }

    #[test]
    fn groupings_flow_to_the_largest_shortfall() {
        // ANA is 100 below target, BIA only 20
        let buyers = eligible(vec![profile("ana", 10, 10, 0), profile("bia", 60, 40, 0)]);
        let out = allocate(&buyers, &[rec("G-1", 5), rec("G-2", 5)]);

        assert_eq!(out.assigned(&name("ana")).len(), 2);
        assert_eq!(out.allocated(&name("ana")), 10);
        assert!(out.assigned(&name("bia")).is_empty());
        assert!(out.residual.is_empty());
    }

    #[test]
    fn equal_shortfall_resolves_to_lexicographically_smallest() {
        let buyers = eligible(vec![profile("carla", 0, 0, 0), profile("ana", 0, 0, 0)]);
        let out = allocate(&buyers, &[rec("G-1", 1)]);
        assert_eq!(out.assigned(&name("ana")), &[GroupingId::new("G-1").unwrap()]);
        assert!(out.assigned(&name("carla")).is_empty());
    }

    #[test]
    fn shortfall_recomputes_after_each_assignment() {
        let buyers = eligible(vec![profile("ana", 0, 0, 0), profile("bia", 0, 0, 0)]);
        // first grouping lands on ANA (tie), dropping her shortfall to 90,
        // so the second lands on BIA
        let out = allocate(&buyers, &[rec("G-1", 30), rec("G-2", 30)]);
        assert_eq!(out.allocated(&name("ana")), 30);
        assert_eq!(out.allocated(&name("bia")), 30);
        assert_eq!(out.states[&name("ana")].shortfall, 90);
    }

    #[test]
    fn shortfall_includes_supplemental_load() {
        let buyers = eligible(vec![profile("ana", 10, 10, 40), profile("bia", 10, 10, 0)]);
        // ANA starts at 120-60=60, BIA at 120-20=100
        let out = allocate(&buyers, &[rec("G-1", 2)]);
        assert_eq!(out.allocated(&name("bia")), 2);
        assert_eq!(out.states[&name("bia")].shortfall, 98);
    }

    #[test]
    fn capacity_gate_admits_below_quota_only() {
        // one buyer, quota 15; a 20-unit grouping is admitted at 0 and
        // overshoots, after which the buyer is closed
        let buyers = eligible(vec![profile("ana", 0, 0, 0)]);
        let out = allocate(&buyers, &[rec("G-1", 20), rec("G-2", 1)]);
        assert_eq!(out.allocated(&name("ana")), 20);
        assert_eq!(out.assigned(&name("ana")).len(), 1);
        assert_eq!(out.residual, vec![GroupingId::new("G-2").unwrap()]);
    }

    #[test]
    fn unit_occurrences_never_exceed_quota() {
        let buyers = eligible(vec![profile("ana", 0, 0, 0)]);
        let groupings: Vec<GroupingRecord> =
            (0..40).map(|i| rec(&format!("G-{i}"), 1)).collect();
        let out = allocate(&buyers, &groupings);
        assert_eq!(out.allocated(&name("ana")), DEFAULT_QUOTA);
        assert_eq!(out.residual.len(), 40 - DEFAULT_QUOTA as usize);
    }

    #[test]
    fn no_eligible_buyers_drops_everything() {
        let out = allocate(&BTreeMap::new(), &[rec("G-1", 1), rec("G-2", 3)]);
        assert!(out.states.is_empty());
        assert_eq!(out.residual.len(), 2);
    }
}
