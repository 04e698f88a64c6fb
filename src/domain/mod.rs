//! Domain model: the raw dataset, the series bundle, and the pure transforms
//! that connect them.

pub mod deviation;
pub mod transform;
pub mod types;

pub use deviation::{format_deviation, Deviation, DivisionByZeroError};
pub use transform::{transform, EmptyDatasetError};
pub use types::{
    ChartConfig, ChartSeriesBundle, DeviationBand, LatestReading, RawDataset, Theme,
    BAND_LOWER_PCT, BAND_UPPER_PCT,
};
