//! Deviation formatting: how far the actual value sits from the target.
//!
//! Used by the latest-reading panel (the tooltip of the original chart) and
//! by the terminal summary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The deviation percentage is undefined for a zero target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("target value is zero; deviation is undefined")]
pub struct DivisionByZeroError;

/// A formatted actual-vs-target deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    /// `(actual - target) / target * 100`, rounded to two decimals.
    pub diff_pct: f64,
    /// Sign-prefixed display label, e.g. `+9.09` or `-5.00`.
    pub label: String,
}

/// Format the relative deviation of `actual` from `target`.
pub fn format_deviation(actual: f64, target: f64) -> Result<Deviation, DivisionByZeroError> {
    if target == 0.0 {
        return Err(DivisionByZeroError);
    }

    let raw = (actual - target) / target * 100.0;
    let mut diff_pct = (raw * 100.0).round() / 100.0;
    // A tiny negative deviation rounds to -0.00; collapse the spurious sign.
    if diff_pct == 0.0 {
        diff_pct = 0.0;
    }

    Ok(Deviation {
        diff_pct,
        label: format!("{diff_pct:+.2}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_deviation_is_plus_prefixed() {
        let d = format_deviation(120.0, 110.0).unwrap();
        assert!((d.diff_pct - 9.09).abs() < 1e-9);
        assert_eq!(d.label, "+9.09");
    }

    #[test]
    fn negative_deviation_is_minus_prefixed() {
        let d = format_deviation(95.0, 100.0).unwrap();
        assert!((d.diff_pct + 5.0).abs() < 1e-9);
        assert_eq!(d.label, "-5.00");
    }

    #[test]
    fn zero_target_is_rejected() {
        assert_eq!(format_deviation(100.0, 0.0), Err(DivisionByZeroError));
        assert_eq!(format_deviation(0.0, 0.0), Err(DivisionByZeroError));
    }

    #[test]
    fn exact_match_formats_as_plus_zero() {
        let d = format_deviation(100.0, 100.0).unwrap();
        assert_eq!(d.diff_pct, 0.0);
        assert_eq!(d.label, "+0.00");
    }

    #[test]
    fn near_zero_negative_deviation_never_shows_minus_zero() {
        // -0.0001% rounds to 0.00; the label must not read "-0.00".
        let d = format_deviation(99.9999, 100.0).unwrap();
        assert_eq!(d.label, "+0.00");
    }

    #[test]
    fn rounding_is_two_decimals() {
        // 0.125% rounds half away from zero to 0.13.
        let d = format_deviation(100.125, 100.0).unwrap();
        assert!((d.diff_pct - 0.13).abs() < 1e-9);
        assert_eq!(d.label, "+0.13");
    }
}
