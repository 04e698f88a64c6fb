//! Synthetic dataset generation: a 10% annualized target path with seeded
//! lognormal noise on the actual path.
//!
//! Used for offline demos (`--sample`) and as deterministic ground truth in
//! tests. Values are rounded to cents so exported JSON stays readable.

use chrono::{Datelike, Months, Utc};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{ChartConfig, RawDataset};
use crate::error::AppError;

/// Annualized growth rate of the target path.
const TARGET_ANNUAL_GROWTH: f64 = 0.10;
/// Monthly lognormal noise sigma applied to the actual path.
const ACTUAL_NOISE_SIGMA: f64 = 0.03;

/// Generate a monthly dataset ending at the current month.
pub fn generate_sample(config: &ChartConfig) -> Result<RawDataset, AppError> {
    if config.sample_months == 0 {
        return Err(AppError::config("Sample month count must be > 0."));
    }
    if !(config.sample_base.is_finite() && config.sample_base > 0.0) {
        return Err(AppError::config("Sample base value must be positive."));
    }

    let monthly_growth = (1.0 + TARGET_ANNUAL_GROWTH).powf(1.0 / 12.0);
    let mut rng = StdRng::seed_from_u64(config.sample_seed);
    let normal = Normal::new(0.0, ACTUAL_NOISE_SIGMA)
        .map_err(|e| AppError::runtime(format!("Noise distribution error: {e}")))?;

    let today = Utc::now().date_naive();
    let start = today
        .checked_sub_months(Months::new(config.sample_months as u32 - 1))
        .unwrap_or(today);

    let mut date = Vec::with_capacity(config.sample_months);
    let mut target = Vec::with_capacity(config.sample_months);
    let mut actual = Vec::with_capacity(config.sample_months);

    for i in 0..config.sample_months {
        let d = start
            .checked_add_months(Months::new(i as u32))
            .unwrap_or(today);
        date.push(format!("{:04}-{:02}", d.year(), d.month()));

        let t = config.sample_base * monthly_growth.powi(i as i32);
        target.push(round_cents(t));

        let z: f64 = normal.sample(&mut rng);
        actual.push(round_cents(t * z.exp()));
    }

    Ok(RawDataset {
        date,
        target,
        actual,
    })
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Theme;

    fn config(months: usize, seed: u64) -> ChartConfig {
        ChartConfig {
            data: None,
            use_sample: true,
            sample_months: months,
            sample_base: 10.0,
            sample_seed: seed,
            theme: Theme::Dark,
            plot_width: 100,
            plot_height: 25,
        }
    }

    #[test]
    fn sample_is_deterministic_for_a_seed() {
        let a = generate_sample(&config(24, 42)).unwrap();
        let b = generate_sample(&config(24, 42)).unwrap();
        assert_eq!(a, b);

        let c = generate_sample(&config(24, 43)).unwrap();
        assert_ne!(a.actual, c.actual);
        // The target path is noise-free, so it does not depend on the seed.
        assert_eq!(a.target, c.target);
    }

    #[test]
    fn sample_series_are_aligned_and_valid() {
        let raw = generate_sample(&config(36, 7)).unwrap();
        assert_eq!(raw.date.len(), 36);
        assert_eq!(raw.target.len(), 36);
        assert_eq!(raw.actual.len(), 36);
        assert!(crate::data::source::validate(&raw).is_ok());
    }

    #[test]
    fn target_grows_ten_percent_per_year() {
        let raw = generate_sample(&config(25, 0)).unwrap();
        let ratio = raw.target[12] / raw.target[0];
        assert!(
            (ratio - 1.10).abs() < 0.01,
            "expected ~10% annual growth, got ratio {ratio}"
        );
    }

    #[test]
    fn zero_months_is_rejected() {
        assert!(generate_sample(&config(0, 0)).is_err());
    }

    #[test]
    fn dates_ascend() {
        let raw = generate_sample(&config(14, 0)).unwrap();
        for pair in raw.date.windows(2) {
            assert!(pair[0] < pair[1], "dates out of order: {pair:?}");
        }
    }
}
