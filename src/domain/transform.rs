//! The data-to-visual-encoding transform.
//!
//! This is the core of the tool: it maps the raw dataset onto the three
//! chart series (categories, target, actual) and derives the deviation band
//! from the last target value. It is deterministic and side-effect free so
//! render adapters stay dumb and the interesting logic stays testable.

use thiserror::Error;

use crate::domain::types::{
    ChartSeriesBundle, DeviationBand, RawDataset, BAND_LOWER_PCT, BAND_UPPER_PCT,
};

/// The dataset cannot be charted: a series is empty or the series disagree
/// on length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmptyDatasetError {
    #[error("dataset has no observations")]
    Empty,
    #[error("series lengths mismatch: date={date}, target={target}, actual={actual}")]
    LengthMismatch {
        date: usize,
        target: usize,
        actual: usize,
    },
}

/// Map a raw dataset into a renderable series bundle.
///
/// Pass-through mapping of the three series (no smoothing or interpolation;
/// that is the renderer's business), plus a deviation band spanning x-index
/// 0 to `len - 1` with bounds at 95% / 105% of the last target value.
pub fn transform(raw: &RawDataset) -> Result<ChartSeriesBundle, EmptyDatasetError> {
    let (n_date, n_target, n_actual) = (raw.date.len(), raw.target.len(), raw.actual.len());

    if n_date == 0 || n_target == 0 || n_actual == 0 {
        return Err(EmptyDatasetError::Empty);
    }
    if n_date != n_target || n_date != n_actual {
        return Err(EmptyDatasetError::LengthMismatch {
            date: n_date,
            target: n_target,
            actual: n_actual,
        });
    }

    let last_target = raw.target[n_target - 1];
    let band = DeviationBand {
        lower_pct: BAND_LOWER_PCT,
        upper_pct: BAND_UPPER_PCT,
        anchor_index: 0,
        end_index: n_date - 1,
        lower_value: last_target * BAND_LOWER_PCT,
        upper_value: last_target * BAND_UPPER_PCT,
    };

    Ok(ChartSeriesBundle {
        categories: raw.date.clone(),
        target_series: raw.target.clone(),
        actual_series: raw.actual.clone(),
        band: Some(band),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> RawDataset {
        RawDataset {
            date: (1..=n).map(|i| format!("2025-{i:02}")).collect(),
            target: (0..n).map(|i| 100.0 + i as f64).collect(),
            actual: (0..n).map(|i| 99.0 + i as f64).collect(),
        }
    }

    #[test]
    fn transform_preserves_series_lengths() {
        for n in [1usize, 2, 12, 100] {
            let bundle = transform(&dataset(n)).unwrap();
            assert_eq!(bundle.categories.len(), n);
            assert_eq!(bundle.target_series.len(), n);
            assert_eq!(bundle.actual_series.len(), n);
        }
    }

    #[test]
    fn band_bounds_come_from_last_target_value() {
        let raw = RawDataset {
            date: vec!["d1".to_string(), "d2".to_string()],
            target: vec![100.0, 110.0],
            actual: vec![95.0, 120.0],
        };
        let band = transform(&raw).unwrap().band.unwrap();

        assert!((band.lower_value - 104.5).abs() < 1e-9);
        assert!((band.upper_value - 115.5).abs() < 1e-9);
        assert_eq!(band.anchor_index, 0);
        assert_eq!(band.end_index, 1);
        assert_eq!(band.lower_pct, BAND_LOWER_PCT);
        assert_eq!(band.upper_pct, BAND_UPPER_PCT);
    }

    #[test]
    fn single_point_dataset_yields_zero_width_band() {
        let bundle = transform(&dataset(1)).unwrap();
        let band = bundle.band.unwrap();
        assert_eq!(band.anchor_index, 0);
        assert_eq!(band.end_index, 0);
        assert!((band.lower_value - 100.0 * 0.95).abs() < 1e-9);
        assert!((band.upper_value - 100.0 * 1.05).abs() < 1e-9);
    }

    #[test]
    fn empty_series_is_rejected() {
        let raw = RawDataset {
            date: vec![],
            target: vec![],
            actual: vec![],
        };
        assert_eq!(transform(&raw), Err(EmptyDatasetError::Empty));

        // A single empty series is just as uncharted.
        let raw = RawDataset {
            date: vec!["d1".to_string()],
            target: vec![],
            actual: vec![100.0],
        };
        assert_eq!(transform(&raw), Err(EmptyDatasetError::Empty));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let raw = RawDataset {
            date: vec!["d1".to_string(), "d2".to_string()],
            target: vec![100.0, 110.0],
            actual: vec![95.0],
        };
        assert_eq!(
            transform(&raw),
            Err(EmptyDatasetError::LengthMismatch {
                date: 2,
                target: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn transform_is_deterministic() {
        let raw = dataset(12);
        assert_eq!(transform(&raw).unwrap(), transform(&raw).unwrap());
    }
}
