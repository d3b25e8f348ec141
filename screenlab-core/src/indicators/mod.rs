//! Indicator math: moving statistics, volatility bands, dispersion.
//!
//! All functions are pure. Identical input sequences always produce
//! identical output; nothing here performs I/O.
//!
//! Standard deviations use the population estimator (divide by N)
//! everywhere, so the band and the coefficient of variation agree.

pub mod bollinger;
pub mod dispersion;

pub use bollinger::{volatility_band, VolatilityBand};
pub use dispersion::{coefficient_of_variation, mean, population_std_dev, volume_ratio};

use thiserror::Error;

/// Errors from indicator computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("insufficient data: need {required} values, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Create synthetic bars from close prices for testing.
///
/// open = prev_close (or close for the first bar), high/low = +/- 1.0
/// around the body, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::DailyBar> {
    use crate::domain::DailyBar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            DailyBar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                close,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
