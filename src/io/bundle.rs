//! Read/write chart bundle JSON files.
//!
//! Bundle JSON is the "portable" representation of one render cycle:
//! - the three chart series
//! - the derived deviation band
//! - metadata (tool, data source, generation date)
//!
//! A saved file can be re-plotted offline with `trend plot --bundle`, or
//! consumed by other tooling.

use std::fs::File;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ChartSeriesBundle;
use crate::error::AppError;

/// A saved bundle file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleFile {
    pub tool: String,
    pub source: String,
    pub generated: NaiveDate,
    pub bundle: ChartSeriesBundle,
}

/// Write a bundle JSON file.
pub fn write_bundle_json(
    path: &Path,
    bundle: &ChartSeriesBundle,
    source_label: &str,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::config(format!(
            "Failed to create bundle JSON '{}': {e}",
            path.display()
        ))
    })?;

    let doc = BundleFile {
        tool: "trend".to_string(),
        source: source_label.to_string(),
        generated: Utc::now().date_naive(),
        bundle: bundle.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::config(format!("Failed to write bundle JSON: {e}")))?;

    Ok(())
}

/// Read a bundle JSON file.
pub fn read_bundle_json(path: &Path) -> Result<BundleFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::config(format!(
            "Failed to open bundle JSON '{}': {e}",
            path.display()
        ))
    })?;
    let doc: BundleFile = serde_json::from_reader(file)
        .map_err(|e| AppError::config(format!("Invalid bundle JSON: {e}")))?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{transform, RawDataset};

    #[test]
    fn bundle_file_round_trips_through_json() {
        let raw = RawDataset {
            date: vec!["2025-01".to_string(), "2025-02".to_string()],
            target: vec![100.0, 110.0],
            actual: vec![95.0, 120.0],
        };
        let doc = BundleFile {
            tool: "trend".to_string(),
            source: "./data.json".to_string(),
            generated: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            bundle: transform(&raw).unwrap(),
        };

        let json = serde_json::to_string_pretty(&doc).unwrap();
        let parsed: BundleFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn bundle_file_round_trips_through_disk() {
        let raw = RawDataset {
            date: vec!["2025-01".to_string()],
            target: vec![100.0],
            actual: vec![95.0],
        };
        let bundle = transform(&raw).unwrap();
        let path = std::env::temp_dir().join("trend-bundle-roundtrip.json");

        write_bundle_json(&path, &bundle, "./data.json").unwrap();
        let doc = read_bundle_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(doc.tool, "trend");
        assert_eq!(doc.source, "./data.json");
        assert_eq!(doc.bundle, bundle);
    }
}
