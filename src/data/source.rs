//! Dataset loading: `data.json` from a local file or an HTTP(S) endpoint.

use std::fs::File;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::domain::RawDataset;
use crate::error::AppError;

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Url(String),
}

impl DataLocation {
    /// Classify a location spec: an `http(s)://` prefix means URL, anything
    /// else is treated as a filesystem path.
    pub fn from_spec(spec: &str) -> Self {
        if spec.starts_with("http://") || spec.starts_with("https://") {
            DataLocation::Url(spec.to_string())
        } else {
            DataLocation::File(PathBuf::from(spec))
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLocation::File(path) => write!(f, "{}", path.display()),
            DataLocation::Url(url) => write!(f, "{url}"),
        }
    }
}

pub struct DataSource {
    client: Client,
    location: DataLocation,
}

impl DataSource {
    pub fn new(location: DataLocation) -> Self {
        Self {
            client: Client::new(),
            location,
        }
    }

    /// Resolve the data location from a CLI flag, falling back to the
    /// `TREND_DATA` environment variable (`.env` supported).
    pub fn resolve(flag: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let spec = match flag {
            Some(s) => s.to_string(),
            None => std::env::var("TREND_DATA").map_err(|_| {
                AppError::config(
                    "No data location: pass --data <path-or-url> or set TREND_DATA (.env).",
                )
            })?,
        };
        Ok(Self::new(DataLocation::from_spec(&spec)))
    }

    pub fn location(&self) -> &DataLocation {
        &self.location
    }

    /// Fetch the dataset and check its value-level invariants.
    ///
    /// Shape errors (empty/mismatched series) are left to the transform,
    /// which reports them as `EmptyDatasetError`.
    pub fn fetch(&self) -> Result<RawDataset, AppError> {
        info!(location = %self.location, "loading dataset");
        let raw = match &self.location {
            DataLocation::File(path) => read_dataset_file(path)?,
            DataLocation::Url(url) => self.fetch_url(url)?,
        };
        validate(&raw)?;
        debug!(points = raw.len(), "dataset loaded");
        Ok(raw)
    }

    fn fetch_url(&self, url: &str) -> Result<RawDataset, AppError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::runtime(format!("Data request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::runtime(format!(
                "Data request failed with status {}.",
                resp.status()
            )));
        }

        resp.json()
            .map_err(|e| AppError::runtime(format!("Failed to parse dataset JSON: {e}")))
    }
}

fn read_dataset_file(path: &Path) -> Result<RawDataset, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::config(format!("Failed to open dataset '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| {
        AppError::config(format!("Invalid dataset JSON '{}': {e}", path.display()))
    })
}

/// Enforce the value-level invariants the chart relies on: finite numbers
/// everywhere and positive targets (the band math divides by nothing, but a
/// zero or negative target makes the growth chart meaningless).
pub fn validate(raw: &RawDataset) -> Result<(), AppError> {
    for (i, &v) in raw.target.iter().enumerate() {
        if !v.is_finite() || v <= 0.0 {
            warn!(index = i, value = v, "invalid target value");
            return Err(AppError::runtime(format!(
                "Invalid target value at index {i}: {v} (must be positive and finite)."
            )));
        }
    }
    for (i, &v) in raw.actual.iter().enumerate() {
        if !v.is_finite() {
            return Err(AppError::runtime(format!(
                "Non-finite actual value at index {i}."
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_spec_classification() {
        assert_eq!(
            DataLocation::from_spec("https://example.com/data.json"),
            DataLocation::Url("https://example.com/data.json".to_string())
        );
        assert_eq!(
            DataLocation::from_spec("http://localhost:8080/data.json"),
            DataLocation::Url("http://localhost:8080/data.json".to_string())
        );
        assert_eq!(
            DataLocation::from_spec("./data.json"),
            DataLocation::File(PathBuf::from("./data.json"))
        );
    }

    #[test]
    fn dataset_json_schema_parses() {
        let json = r#"{"date": ["2025-01", "2025-02"], "target": [100.0, 101.0], "actual": [99.5, 103.2]}"#;
        let raw: RawDataset = serde_json::from_str(json).unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.latest_date(), Some("2025-02"));
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn validate_rejects_nonpositive_target() {
        let raw = RawDataset {
            date: vec!["d1".to_string()],
            target: vec![0.0],
            actual: vec![1.0],
        };
        assert!(validate(&raw).is_err());

        let raw = RawDataset {
            date: vec!["d1".to_string()],
            target: vec![-5.0],
            actual: vec![1.0],
        };
        assert!(validate(&raw).is_err());
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let raw = RawDataset {
            date: vec!["d1".to_string()],
            target: vec![f64::NAN],
            actual: vec![1.0],
        };
        assert!(validate(&raw).is_err());

        let raw = RawDataset {
            date: vec!["d1".to_string()],
            target: vec![100.0],
            actual: vec![f64::INFINITY],
        };
        assert!(validate(&raw).is_err());
    }
}
