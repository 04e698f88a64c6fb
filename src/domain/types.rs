//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a render cycle
//! - exported to JSON
//! - reloaded later for plotting or comparisons

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::deviation::Deviation;

/// Lower edge of the deviation band as a fraction of the last target value.
pub const BAND_LOWER_PCT: f64 = 0.95;
/// Upper edge of the deviation band as a fraction of the last target value.
pub const BAND_UPPER_PCT: f64 = 1.05;

/// The raw chart dataset, as served by `data.json`.
///
/// Invariant (enforced at the source boundary, not per-field): all three
/// series have equal length ≥ 1, dates ascend, and target values are
/// positive and finite. Dates are opaque category labels; we never parse
/// them for chart purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub date: Vec<String>,
    pub target: Vec<f64>,
    pub actual: Vec<f64>,
}

impl RawDataset {
    /// Number of observations (defined by the `date` series).
    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// The newest date label, used for the "updated" header line.
    pub fn latest_date(&self) -> Option<&str> {
        self.date.last().map(String::as_str)
    }
}

/// The ±5% tolerance region around the growth target.
///
/// Anchored to the *last* target value: the band is a horizontal region
/// spanning the full x-range, not a per-point envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationBand {
    pub lower_pct: f64,
    pub upper_pct: f64,
    /// First x-index covered by the band (always 0 for a full-width band).
    pub anchor_index: usize,
    /// Last x-index covered by the band.
    pub end_index: usize,
    pub lower_value: f64,
    pub upper_value: f64,
}

/// Everything a render adapter needs to draw one chart frame.
///
/// Constructed once per fetch, immutable, and discarded on the next
/// fetch/render cycle. `band` is `None` only for the empty fallback bundle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeriesBundle {
    pub categories: Vec<String>,
    pub target_series: Vec<f64>,
    pub actual_series: Vec<f64>,
    pub band: Option<DeviationBand>,
}

impl ChartSeriesBundle {
    /// The degraded-mode bundle rendered when no dataset is available.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The newest observation, shown in the header and the latest-reading panel.
///
/// `deviation` is `None` when the target is zero (the deviation line is
/// omitted rather than crashing the render).
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReading {
    pub date: String,
    pub actual: f64,
    pub target: f64,
    pub deviation: Option<Deviation>,
}

/// Chart color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Cycle order used by the TUI theme key.
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and the `TREND_DATA`
/// environment variable).
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Data location: a local path or an `http(s)://` URL. `None` means the
    /// synthetic sample dataset.
    pub data: Option<String>,
    /// Force the synthetic sample even if a data location is configured.
    pub use_sample: bool,

    /// Number of monthly observations in the sample dataset.
    pub sample_months: usize,
    /// Starting asset value for the sample dataset.
    pub sample_base: f64,
    /// Random seed for sample noise.
    pub sample_seed: u64,

    pub theme: Theme,

    pub plot_width: usize,
    pub plot_height: usize,
}
