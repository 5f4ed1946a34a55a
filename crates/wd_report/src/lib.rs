//! wd_report — pure offline report model + renderers.
//!
//! Consolidates engine output with the full buyer set into one record per
//! buyer. No I/O here; callers supply already-computed artifacts and write
//! the rendered output themselves.
//!
//! Determinism rules:
//! - Rows are emitted in canonical buyer order.
//! - The average cycle time renders at one decimal from integer tenths;
//!   every other column is a whole number. No float arithmetic anywhere.

#![forbid(unsafe_code)]

pub mod structure;
#[cfg(feature = "render_json")]
pub mod render_json;
pub mod render_text;

pub use structure::{build_model, Provenance, ReportModel, ReportRow, ReportSummary};
#[cfg(feature = "render_json")]
pub use render_json::render_json;
pub use render_text::render_text;
