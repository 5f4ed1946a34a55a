//! wd_core — Core types for the WD engine.
//!
//! This crate is **I/O-free**. It defines the stable types/APIs used across
//! the engine (`wd_io`, `wd_algo`, `wd_pipeline`, `wd_report`, `wd_cli`):
//!
//! - Canonical text normalization (`normalize_text`)
//! - Grouping classification: priority weight + kind tag
//! - Tokens: `BuyerName`, `GroupingId`
//! - Buyer profiles and workload domains
//! - Integer-tenths numerics (one-decimal values without float arithmetic)
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod classify;
pub mod entities;
pub mod normalize;
pub mod tenths;

pub use classify::{grouping_kind, priority_weight, GroupingKind};
pub use entities::{
    BuyerName, BuyerProfile, GroupingId, GroupingRecord, Workload, CYCLE_LIMIT_TENTHS,
    DEFAULT_QUOTA, IN_PROGRESS_LIMIT, REDUCED_QUOTA, SUFFICIENCY_TARGET,
};
pub use normalize::normalize_text;
