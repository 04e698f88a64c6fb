//! Shared "render pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! acquire dataset -> transform -> latest reading
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::debug;

use crate::data::{generate_sample, DataSource};
use crate::domain::{transform, ChartConfig, ChartSeriesBundle, LatestReading, RawDataset};
use crate::error::AppError;
use crate::report::latest_reading;

/// All computed outputs of a single render cycle.
///
/// Immutable once built; a refetch produces a fresh value instead of
/// mutating a shared chart-option template.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Human-readable label of where the data came from.
    pub source: String,
    pub raw: RawDataset,
    pub bundle: ChartSeriesBundle,
    pub latest: Option<LatestReading>,
}

/// Execute the full pipeline: acquire the dataset and build the bundle.
pub fn run_chart(config: &ChartConfig) -> Result<RunOutput, AppError> {
    let (raw, source) = acquire_dataset(config)?;
    run_chart_with_dataset(raw, source)
}

/// Execute the pipeline with an already-acquired dataset.
///
/// This is useful when re-rendering without refetching.
pub fn run_chart_with_dataset(raw: RawDataset, source: String) -> Result<RunOutput, AppError> {
    let bundle =
        transform(&raw).map_err(|e| AppError::runtime(format!("Cannot chart dataset: {e}")))?;
    let latest = latest_reading(&raw);

    Ok(RunOutput {
        source,
        raw,
        bundle,
        latest,
    })
}

/// Acquire the raw dataset per config.
///
/// Precedence: `--sample` forces the synthetic dataset; otherwise `--data`,
/// then `TREND_DATA`. With no location configured anywhere we fall back to
/// the sample so a bare `trend` still shows a chart.
fn acquire_dataset(config: &ChartConfig) -> Result<(RawDataset, String), AppError> {
    if config.use_sample {
        return Ok((generate_sample(config)?, sample_label(config)));
    }

    match DataSource::resolve(config.data.as_deref()) {
        Ok(source) => {
            let label = source.location().to_string();
            Ok((source.fetch()?, label))
        }
        Err(err) if config.data.is_none() => {
            debug!(%err, "no data location configured; using sample dataset");
            Ok((generate_sample(config)?, sample_label(config)))
        }
        Err(err) => Err(err),
    }
}

fn sample_label(config: &ChartConfig) -> String {
    format!(
        "sample (months={}, seed={})",
        config.sample_months, config.sample_seed
    )
}
