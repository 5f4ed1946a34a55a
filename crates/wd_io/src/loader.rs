//! Loader: read the local JSON snapshots (buyers → groupings → control),
//! validate columns, normalize identifiers, and return typed inputs plus
//! per-input digests for the run provenance. No network I/O.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use wd_core::{BuyerName, GroupingRecord};

use crate::buyers::{self, BuyerRow};
use crate::control;
use crate::groupings;
use crate::hasher;
use crate::table::Table;
use crate::{IoError, IoResult, Warning};

/// SHA-256 (lowercase hex) of the canonical bytes of each loaded input.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct InputDigests {
    pub buyers_sha256: String,
    pub groupings_sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_sha256: Option<String>,
}

/// Loaded, validated, normalized inputs for one run.
#[derive(Debug)]
pub struct RunInputs {
    /// Buyer rows in input order (duplicates intact; the profile builder
    /// resolves them last-wins).
    pub buyers: Vec<BuyerRow>,
    /// Distinct grouping records in first-seen order.
    pub groupings: Vec<GroupingRecord>,
    /// Supplemental quantity per buyer; empty when the control dataset is absent.
    pub control: BTreeMap<BuyerName, u64>,
    pub digests: InputDigests,
    pub warnings: Vec<Warning>,
}

/// Load everything from explicit file paths; the control dataset is optional.
pub fn load_run_inputs(
    buyers_path: &Path,
    groupings_path: &Path,
    control_path: Option<&Path>,
) -> IoResult<RunInputs> {
    let buyers_value = read_json_value(buyers_path)?;
    let buyers_table = Table::from_value(buyers::DATASET, &buyers_value)?;
    let buyers_rows = buyers::buyer_rows(&buyers_table)?;

    let groupings_value = read_json_value(groupings_path)?;
    let groupings_table = Table::from_value(groupings::DATASET, &groupings_value)?;
    let grouping_recs = groupings::grouping_records(&groupings_table)?;

    let mut warnings = Vec::new();
    let (control_map, control_sha256) = match control_path {
        Some(path) => {
            let value = read_json_value(path)?;
            let table = Table::from_value(control::DATASET, &value)?;
            let map = control::supplemental_map(&table, &mut warnings)?;
            (map, Some(hasher::sha256_canonical_value(&value)))
        }
        None => (BTreeMap::new(), None),
    };

    Ok(RunInputs {
        buyers: buyers_rows,
        groupings: grouping_recs,
        control: control_map,
        digests: InputDigests {
            buyers_sha256: hasher::sha256_canonical_value(&buyers_value),
            groupings_sha256: hasher::sha256_canonical_value(&groupings_value),
            control_sha256,
        },
        warnings,
    })
}

/// Read and parse one dataset file.
pub fn read_json_value(path: &Path) -> IoResult<Value> {
    let text = fs::read_to_string(path)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| IoError::Json(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, v: &Value) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(serde_json::to_string_pretty(v).unwrap().as_bytes()).unwrap();
        path
    }

    fn buyers_fixture() -> Value {
        json!([
            {"COMPRADOR": "Ana", "PRODUÇÃO QTD. ITENS TOTAL": 10, "QTD. RC_ITEM": 5,
             "TMC GMP": 100.0, "QTD. GMP EM ANDAMENTO": 3},
            {"COMPRADOR": "Bia", "PRODUÇÃO QTD. ITENS TOTAL": 0, "QTD. RC_ITEM": 0,
             "TMC GMP": 200.0, "QTD. GMP EM ANDAMENTO": 30}
        ])
    }

    fn groupings_fixture() -> Value {
        json!([
            {"Nº ACOMPANHAMENTO": "EA-1"},
            {"Nº ACOMPANHAMENTO": "EA-1"},
            {"Nº ACOMPANHAMENTO": "PLAIN-2"}
        ])
    }

    #[test]
    fn loads_all_three_datasets() {
        let dir = tempfile::tempdir().unwrap();
        let b = write_file(&dir, "buyers.json", &buyers_fixture());
        let g = write_file(&dir, "groupings.json", &groupings_fixture());
        let c = write_file(
            &dir,
            "control.json",
            &json!([{"CONTRATADOR": "ANA-00123", "GMP": null, "EDITAL E GMC": "ok",
                     "QUANTIDADE DE LINHAS": 4}]),
        );

        let inputs = load_run_inputs(&b, &g, Some(&c)).unwrap();
        assert_eq!(inputs.buyers.len(), 2);
        assert_eq!(inputs.groupings.len(), 2);
        assert_eq!(inputs.control[&BuyerName::new("ANA").unwrap()], 4);
        assert_eq!(inputs.digests.buyers_sha256.len(), 64);
        assert!(inputs.digests.control_sha256.is_some());
        assert!(inputs.warnings.is_empty());
    }

    #[test]
    fn control_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let b = write_file(&dir, "buyers.json", &buyers_fixture());
        let g = write_file(&dir, "groupings.json", &groupings_fixture());
        let inputs = load_run_inputs(&b, &g, None).unwrap();
        assert!(inputs.control.is_empty());
        assert!(inputs.digests.control_sha256.is_none());
    }

    #[test]
    fn digests_are_stable_across_formatting() {
        let dir = tempfile::tempdir().unwrap();
        let b1 = write_file(&dir, "b1.json", &buyers_fixture());
        let g = write_file(&dir, "g.json", &groupings_fixture());
        // same value, compact formatting
        let path = dir.path().join("b2.json");
        fs::write(&path, serde_json::to_string(&buyers_fixture()).unwrap()).unwrap();

        let i1 = load_run_inputs(&b1, &g, None).unwrap();
        let i2 = load_run_inputs(&path, &g, None).unwrap();
        assert_eq!(i1.digests.buyers_sha256, i2.digests.buyers_sha256);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let g = write_file(&dir, "g.json", &groupings_fixture());
        let missing = dir.path().join("nope.json");
        assert!(matches!(load_run_inputs(&missing, &g, None), Err(IoError::Read(_))));
    }
}
