//! Buyer and grouping domain entities.
//!
//! All quantities are integers; the average cycle time is carried as
//! integer tenths (see `crate::tenths`). Entities are built once per run
//! from immutable input snapshots; only the engine's per-run counters
//! mutate, and those live in `wd_algo`, not here.

use core::fmt;

use crate::classify::{grouping_kind, priority_weight, GroupingKind};
use crate::normalize::normalize_text;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed workload level buyers are balanced toward.
pub const SUFFICIENCY_TARGET: u64 = 120;
/// Occurrence-unit cap per buyer and run.
pub const DEFAULT_QUOTA: u64 = 15;
/// Cap once a buyer's existing load already meets the sufficiency target.
pub const REDUCED_QUOTA: u64 = 2;
/// Eligibility: average cycle time at or below 160.0 (stored as tenths).
pub const CYCLE_LIMIT_TENTHS: u64 = 1600;
/// Eligibility: at most 16 in-progress processes.
pub const IN_PROGRESS_LIMIT: u64 = 16;

/// Normalized buyer token. Lexicographic order on the normalized string is
/// the canonical buyer order used for map iteration and tie-breaks.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuyerName(String);

impl BuyerName {
    /// Normalize `raw`; `None` when nothing remains (null/empty cells).
    pub fn new(raw: &str) -> Option<Self> {
        let n = normalize_text(raw);
        if n.is_empty() {
            None
        } else {
            Some(Self(n))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuyerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized grouping code token.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupingId(String);

impl GroupingId {
    /// Normalize `raw`; `None` when nothing remains.
    pub fn new(raw: &str) -> Option<Self> {
        let n = normalize_text(raw);
        if n.is_empty() {
            None
        } else {
            Some(Self(n))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One distinct grouping after deduplication: identifier, classification,
/// and how many raw rows shared the identifier. Immutable once built.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupingRecord {
    pub id: GroupingId,
    pub weight: u8,
    pub kind: GroupingKind,
    pub occurrences: u64,
}

impl GroupingRecord {
    /// Stamp weight and kind from the identifier (single source of truth).
    pub fn classify(id: GroupingId, occurrences: u64) -> Self {
        let weight = priority_weight(id.as_str());
        let kind = grouping_kind(id.as_str());
        Self { id, weight, kind, occurrences }
    }
}

/// Raw workload inputs for one buyer (numeric, missing cells default 0).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Workload {
    /// Total produced items.
    pub production_total: u64,
    /// Pending requisition items.
    pub pending_items: u64,
    /// Average cycle time, in tenths (153.2 → 1532).
    pub avg_cycle_tenths: u64,
    /// Processes currently in progress.
    pub in_progress: u64,
}

impl Workload {
    /// `production_total + pending_items`.
    pub fn base_load(&self) -> u64 {
        self.production_total + self.pending_items
    }
}

/// Per-buyer view the engine allocates against. Built once per run; the
/// mutable allocation counter lives with the engine, not here.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuyerProfile {
    pub name: BuyerName,
    pub workload: Workload,
    /// Supplemental load attributed from the control dataset (default 0).
    pub supplemental: u64,
    /// Occurrence-unit cap for this run.
    pub target_quota: u64,
    pub eligible: bool,
}

impl BuyerProfile {
    /// Derive quota and eligibility from the raw inputs.
    pub fn new(name: BuyerName, workload: Workload, supplemental: u64) -> Self {
        let target_quota = if workload.base_load() + supplemental >= SUFFICIENCY_TARGET {
            REDUCED_QUOTA
        } else {
            DEFAULT_QUOTA
        };
        let eligible = workload.avg_cycle_tenths <= CYCLE_LIMIT_TENTHS
            || workload.in_progress <= IN_PROGRESS_LIMIT;
        Self { name, workload, supplemental, target_quota, eligible }
    }

    pub fn base_load(&self) -> u64 {
        self.workload.base_load()
    }

    /// Remaining distance below the sufficiency target once `allocated`
    /// occurrence units have been assigned. Never negative; non-increasing
    /// as `allocated` grows.
    pub fn shortfall(&self, allocated: u64) -> u64 {
        SUFFICIENCY_TARGET.saturating_sub(self.base_load() + self.supplemental + allocated)
    }
}
