use crate::app::pipeline::RunOutput;
use crate::domain::{format_deviation, ChartConfig, LatestReading, RawDataset};

/// Extract the newest observation from the dataset.
///
/// The deviation is left out when the target is zero; the caller renders the
/// reading without that line instead of failing.
pub fn latest_reading(raw: &RawDataset) -> Option<LatestReading> {
    let date = raw.date.last()?.clone();
    let target = *raw.target.last()?;
    let actual = *raw.actual.last()?;

    Some(LatestReading {
        date,
        actual,
        target,
        deviation: format_deviation(actual, target).ok(),
    })
}

/// Format the full run summary (source, series ranges, band, latest reading).
pub fn format_summary(run: &RunOutput, config: &ChartConfig) -> String {
    let mut out = String::new();

    out.push_str("=== trend - Asset Growth Trend ===\n");
    out.push_str(&format!("Source: {}\n", run.source));
    out.push_str(&format!("Theme: {}\n", config.theme.display_name()));

    let first_date = run.raw.date.first().map(String::as_str).unwrap_or("-");
    let last_date = run.raw.latest_date().unwrap_or("-");
    out.push_str(&format!(
        "Points: n={} | {first_date} .. {last_date}\n",
        run.raw.len()
    ));

    if let Some((lo, hi)) = series_range(&run.bundle.target_series) {
        out.push_str(&format!("Target: [{lo:.2}, {hi:.2}]\n"));
    }
    if let Some((lo, hi)) = series_range(&run.bundle.actual_series) {
        out.push_str(&format!("Actual: [{lo:.2}, {hi:.2}]\n"));
    }
    if let Some(band) = &run.bundle.band {
        out.push_str(&format!(
            "Band: {:.0}%..{:.0}% of last target | [{:.2}, {:.2}]\n",
            band.lower_pct * 100.0,
            band.upper_pct * 100.0,
            band.lower_value,
            band.upper_value
        ));
    }

    if let Some(latest) = &run.latest {
        out.push('\n');
        out.push_str(&format_latest(latest));
    }

    out
}

/// Format the latest reading block (the tooltip analog of the original chart).
pub fn format_latest(latest: &LatestReading) -> String {
    let mut out = String::new();
    out.push_str(&format!("Latest ({}):\n", latest.date));
    out.push_str(&format!("- actual: {:.2}\n", latest.actual));
    out.push_str(&format!("- target: {:.2}\n", latest.target));
    if let Some(dev) = &latest.deviation {
        out.push_str(&format!("- deviation: {}%\n", dev.label));
    }
    out
}

fn series_range(series: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in series {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_reading_carries_deviation() {
        let raw = RawDataset {
            date: vec!["2025-01".to_string(), "2025-02".to_string()],
            target: vec![100.0, 110.0],
            actual: vec![95.0, 120.0],
        };
        let latest = latest_reading(&raw).unwrap();
        assert_eq!(latest.date, "2025-02");
        assert_eq!(latest.actual, 120.0);
        assert_eq!(latest.target, 110.0);
        assert_eq!(latest.deviation.unwrap().label, "+9.09");
    }

    #[test]
    fn latest_reading_of_empty_dataset_is_none() {
        let raw = RawDataset {
            date: vec![],
            target: vec![],
            actual: vec![],
        };
        assert!(latest_reading(&raw).is_none());
    }

    #[test]
    fn zero_target_omits_the_deviation_line() {
        let latest = LatestReading {
            date: "2025-02".to_string(),
            actual: 120.0,
            target: 0.0,
            deviation: None,
        };
        let txt = format_latest(&latest);
        assert!(txt.contains("actual: 120.00"));
        assert!(!txt.contains("deviation"));
    }

    #[test]
    fn latest_block_is_sign_prefixed() {
        let raw = RawDataset {
            date: vec!["2025-01".to_string()],
            target: vec![100.0],
            actual: vec![95.0],
        };
        let latest = latest_reading(&raw).unwrap();
        let txt = format_latest(&latest);
        assert!(txt.contains("deviation: -5.00%"));
    }
}
