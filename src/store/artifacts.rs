//! Reading and writing the trained model artifacts.
//!
//! Artifacts are plain columnar files so that the trainer and the API can
//! evolve independently: `rules_model.csv` and `segment_model.csv` hold the
//! deployed tables, `rules_manifest.json` records what produced them. Writes
//! go through a sibling temp file and a rename so a crashed training run can
//! never leave a half-written artifact behind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{DeployedRule, RuleTable, SegmentRecord, SegmentTable};

/// File name of the deployed rules table inside the model directory.
pub const RULES_ARTIFACT: &str = "rules_model.csv";

/// File name of the customer segment table inside the model directory.
pub const SEGMENTS_ARTIFACT: &str = "segment_model.csv";

/// File name of the training run manifest inside the model directory.
pub const MANIFEST_FILE: &str = "rules_manifest.json";

/// Errors that may occur while reading or writing model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("manifest error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Metadata describing a training run, stored next to the rules artifact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RulesManifest {
    pub trained_at: DateTime<Utc>,
    pub min_support: f64,
    pub min_lift: f64,
    pub basket_count: usize,
    pub item_count: usize,
    pub itemset_count: usize,
    pub rule_count: usize,
}

/// Writes the deployed rules table to `<dir>/rules_model.csv`.
///
/// An empty slice still produces a valid header-only artifact; callers decide
/// whether to write at all.
pub fn write_rules(dir: &Path, rules: &[DeployedRule]) -> Result<PathBuf, ArtifactError> {
    let path = dir.join(RULES_ARTIFACT);
    let tmp = dir.join(format!("{RULES_ARTIFACT}.tmp"));

    let mut writer = csv::Writer::from_path(&tmp)?;
    for rule in rules {
        writer.serialize(rule)?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp, &path)?;
    Ok(path)
}

/// Reads a deployed rules table, preserving file order.
pub fn read_rules(path: &Path) -> Result<RuleTable, ArtifactError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let rule: DeployedRule = record?;
        rows.push(rule);
    }
    Ok(RuleTable::new(rows))
}

/// Writes the customer segment table to `<dir>/segment_model.csv`.
pub fn write_segments(dir: &Path, records: &[SegmentRecord]) -> Result<PathBuf, ArtifactError> {
    let path = dir.join(SEGMENTS_ARTIFACT);
    let tmp = dir.join(format!("{SEGMENTS_ARTIFACT}.tmp"));

    let mut writer = csv::Writer::from_path(&tmp)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp, &path)?;
    Ok(path)
}

/// Reads a customer segment table into its lookup form.
pub fn read_segments(path: &Path) -> Result<SegmentTable, ArtifactError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        let row: SegmentRecord = record?;
        records.push(row);
    }
    Ok(SegmentTable::from_records(records))
}

/// Writes the training manifest to `<dir>/rules_manifest.json`.
pub fn write_manifest(dir: &Path, manifest: &RulesManifest) -> Result<PathBuf, ArtifactError> {
    let path = dir.join(MANIFEST_FILE);
    let tmp = dir.join(format!("{MANIFEST_FILE}.tmp"));

    let payload = serde_json::to_string_pretty(manifest)?;
    fs::write(&tmp, payload)?;
    fs::rename(&tmp, &path)?;
    Ok(path)
}

/// Reads a training manifest.
pub fn read_manifest(path: &Path) -> Result<RulesManifest, ArtifactError> {
    let payload = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&payload)?)
}
