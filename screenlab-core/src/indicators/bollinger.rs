//! Volatility band (Bollinger Bands) at the tail of a daily series.
//!
//! - Middle: SMA(close, window) over the trailing `window` sessions
//! - Upper: middle + deviations * stddev(close, window)
//! - Lower: middle - deviations * stddev(close, window)
//!
//! Uses population stddev (divide by N).

use serde::{Deserialize, Serialize};

use super::dispersion::{mean, population_std_dev};
use super::IndicatorError;
use crate::domain::DailyBar;

/// Band values at the most recent session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityBand {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

impl VolatilityBand {
    /// Distance from `price` up to the upper band, as a percentage of `price`.
    pub fn headroom_pct(&self, price: f64) -> f64 {
        (self.upper - price) / price * 100.0
    }
}

/// Compute the band over the trailing `window` closes ending at the series tail.
pub fn volatility_band(
    bars: &[DailyBar],
    window: usize,
    deviations: f64,
) -> Result<VolatilityBand, IndicatorError> {
    if window == 0 || bars.len() < window {
        return Err(IndicatorError::InsufficientData {
            required: window.max(1),
            available: bars.len(),
        });
    }

    let closes: Vec<f64> = bars[bars.len() - window..].iter().map(|b| b.close).collect();
    let middle = mean(&closes);
    let width = deviations * population_std_dev(&closes);

    Ok(VolatilityBand {
        lower: middle - width,
        middle,
        upper: middle + width,
    })
}
