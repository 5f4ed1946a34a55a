//! Row-table view over a JSON dataset.
//!
//! Each dataset is an array of row objects (the in-memory image of an
//! uploaded sheet). Header keys are canonicalized with `normalize_text`
//! at construction, so every column lookup downstream is case-, accent-
//! and whitespace-insensitive. The column set is the union of keys across
//! all rows, mirroring a sheet's global header line.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use wd_core::normalize_text;

use crate::{IoError, IoResult};

/// One row with canonical header keys.
pub type Row = BTreeMap<String, Value>;

#[derive(Debug)]
pub struct Table {
    dataset: &'static str,
    columns: BTreeSet<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table from a parsed dataset value.
    /// Non-array input, or any non-object element, is a shape error.
    pub fn from_value(dataset: &'static str, value: &Value) -> IoResult<Self> {
        let arr = value.as_array().ok_or_else(|| IoError::Shape {
            dataset,
            msg: "top-level value is not an array".into(),
        })?;

        let mut columns = BTreeSet::new();
        let mut rows = Vec::with_capacity(arr.len());
        for (i, elem) in arr.iter().enumerate() {
            let obj = elem.as_object().ok_or_else(|| IoError::Shape {
                dataset,
                msg: format!("row {i} is not an object"),
            })?;
            let mut row = Row::new();
            for (k, v) in obj {
                let key = normalize_text(k);
                if !key.is_empty() {
                    columns.insert(key.clone());
                    // Duplicate headers after normalization: last one wins.
                    row.insert(key, v.clone());
                }
            }
            rows.push(row);
        }

        Ok(Self { dataset, columns, rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Fatal check for a required column (fails even on an empty dataset,
    /// which has no schema to satisfy).
    pub fn require_column(&self, column: &str) -> IoResult<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(IoError::MissingColumn { dataset: self.dataset, column: column.to_string() })
        }
    }

    /// First column (in canonical order) whose name contains `marker`.
    pub fn find_column_containing(&self, marker: &str) -> Option<&str> {
        self.columns.iter().map(String::as_str).find(|c| c.contains(marker))
    }
}

/// Textual content of a cell: strings pass through, numbers are rendered,
/// null/missing/other shapes yield `None`.
pub fn cell_display(row: &Row, column: &str) -> Option<String> {
    match row.get(column) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric content of a cell. Numbers convert directly; numeric strings
/// are parsed; everything else (null, missing, non-numeric text) is 0.
pub fn cell_number(row: &Row, column: &str) -> f64 {
    match row.get(column) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// A cell counts as blank when it is null, missing, or an
/// empty/whitespace-only string. Numbers are never blank, including 0.
pub fn cell_is_blank(row: &Row, column: &str) -> bool {
    match row.get(column) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}
