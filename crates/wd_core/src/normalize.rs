//! Canonical text normalization.
//!
//! Every identifier comparison in the engine goes through `normalize_text`:
//! trim, NFD-decompose, drop combining marks, uppercase. The function is
//! idempotent, so layers may re-normalize defensively without drift.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form of a free-text identifier.
///
/// - Leading/trailing whitespace is removed.
/// - Accented characters decompose to base letter + combining marks (NFD),
///   and the marks are dropped ("São João" → "SAO JOAO").
/// - The result is uppercased.
///
/// Always returns a string; empty input yields an empty string.
pub fn normalize_text(input: &str) -> String {
    input
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .collect()
}
