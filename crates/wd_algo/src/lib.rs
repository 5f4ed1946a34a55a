//! wd_algo — ranking and the greedy allocation engine.
//!
//! Pure functions over `wd_core` types; no I/O, no shared state beyond the
//! per-run buyer counters owned by the engine itself. Given the same
//! inputs, two runs produce byte-identical outcomes.

#![forbid(unsafe_code)]

pub mod engine;
pub mod ranking;

pub use engine::{allocate, AllocationOutcome, BuyerState};
pub use ranking::rank_groupings;
