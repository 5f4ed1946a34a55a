//! Integer-tenths numerics.
//!
//! One-decimal quantities (the average cycle time) are stored as integer
//! tenths so comparisons and display never involve float arithmetic.
//! Floats exist only at the ingestion boundary, where JSON numbers are
//! converted exactly once.

/// Convert a JSON-sourced number to tenths: 153.24 → 1532.
/// Negative, NaN and infinite inputs clamp to 0.
pub fn tenths_from_f64(x: f64) -> u64 {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    (x * 10.0).round() as u64
}

/// Convert a JSON-sourced number to a whole count: 12.6 → 13.
/// Negative, NaN and infinite inputs clamp to 0.
pub fn count_from_f64(x: f64) -> u64 {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    x.round() as u64
}

/// Render tenths with exactly one decimal place: 1532 → "153.2", 0 → "0.0".
pub fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
