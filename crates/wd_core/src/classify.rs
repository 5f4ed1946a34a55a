//! Grouping classification: priority weight and kind tag.
//!
//! Both checks are plain substring containment on the normalized
//! identifier — no regex, no position sensitivity. Ranking and reporting
//! must call these functions rather than re-deriving the markers, so the
//! weights stay a single source of truth.

use crate::normalize::normalize_text;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marker for expedited-acquisition groupings (weight 3).
const EXPEDITED_MARKER: &str = "EA";
/// Marker for direct-procurement groupings (weight 2).
const DIRECT_MARKER: &str = "PID";
/// Marker for bidding-process groupings.
const AUCTION_MARKER: &str = "PREG";

/// Priority weight of a grouping identifier: 3 for `EA`, 2 for `PID`, else 1.
///
/// The identifier is re-normalized internally (idempotent), so callers may
/// pass raw or canonical text.
pub fn priority_weight(identifier: &str) -> u8 {
    let id = normalize_text(identifier);
    if id.contains(EXPEDITED_MARKER) {
        3
    } else if id.contains(DIRECT_MARKER) {
        2
    } else {
        1
    }
}

/// Kind tag of a grouping, derived from its identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GroupingKind {
    Auction,
    Other,
}

impl GroupingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingKind::Auction => "AUCTION",
            GroupingKind::Other => "OTHER",
        }
    }
}

impl core::fmt::Display for GroupingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Auction` iff the normalized identifier contains the bidding marker.
pub fn grouping_kind(identifier: &str) -> GroupingKind {
    if normalize_text(identifier).contains(AUCTION_MARKER) {
        GroupingKind::Auction
    } else {
        GroupingKind::Other
    }
}
