//! Numeric cut-offs of the filter chain.
//!
//! Estimation constants such as the floating share of market value are
//! business-rule approximations kept here so they can be revisited
//! without touching the chain itself.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::indicators::dispersion::VOLUME_WINDOW;

/// Fraction of total market value assumed to be free float.
pub const FLOAT_VALUE_RATIO: f64 = 0.7;

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("{name}: min {min} exceeds max {max}")]
    InvertedBounds { name: &'static str, min: f64, max: f64 },

    #[error("{name} must be >= 1")]
    ZeroWindow { name: &'static str },

    #[error("min_history {min_history} is shorter than the {required} sessions the windows need")]
    HistoryTooShort { min_history: usize, required: usize },

    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}

/// Cut-offs for each stage of the chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenThresholds {
    /// Stage 1: minimum number of daily bars.
    pub min_history: usize,
    /// Stage 3: accepted daily move, percent.
    pub price_move_pct: Bounds,
    /// Stage 4: minimum volume ratio.
    pub min_volume_ratio: f64,
    /// Stage 5: accepted turnover estimate, percent.
    pub turnover_pct: Bounds,
    /// Stage 6: free-float share of total market value.
    pub float_value_ratio: f64,
    /// Stage 6: accepted float market value, currency units.
    pub float_market_value: Bounds,
    /// Stage 7: maximum coefficient of variation of volume.
    pub max_volume_cv: f64,
    /// Stage 8: band window and width.
    pub band_window: usize,
    pub band_deviations: f64,
    /// Stage 8: minimum distance below the upper band, percent.
    pub min_band_headroom_pct: f64,
    /// Stage 9: required intraday return over the benchmark, percentage points.
    pub min_intraday_excess_pct: f64,
}

impl Default for ScreenThresholds {
    fn default() -> Self {
        Self {
            min_history: 20,
            price_move_pct: Bounds::new(3.0, 5.0),
            min_volume_ratio: 1.0,
            turnover_pct: Bounds::new(5.0, 10.0),
            float_value_ratio: FLOAT_VALUE_RATIO,
            float_market_value: Bounds::new(50e8, 200e8),
            max_volume_cv: 0.5,
            band_window: 20,
            band_deviations: 2.0,
            min_band_headroom_pct: 3.0,
            min_intraday_excess_pct: 1.0,
        }
    }
}

impl ScreenThresholds {
    /// Sessions the volume ratio needs: the prior window plus today.
    pub fn volume_history(&self) -> usize {
        VOLUME_WINDOW + 1
    }

    pub fn validate(&self) -> Result<(), ThresholdError> {
        if self.band_window == 0 {
            return Err(ThresholdError::ZeroWindow { name: "band_window" });
        }

        let required = self.band_window.max(self.volume_history());
        if self.min_history < required {
            return Err(ThresholdError::HistoryTooShort {
                min_history: self.min_history,
                required,
            });
        }

        for (name, b) in [
            ("price_move_pct", self.price_move_pct),
            ("turnover_pct", self.turnover_pct),
            ("float_market_value", self.float_market_value),
        ] {
            for value in [b.min, b.max] {
                if !value.is_finite() {
                    return Err(ThresholdError::NotFinite { name, value });
                }
            }
            if b.min > b.max {
                return Err(ThresholdError::InvertedBounds {
                    name,
                    min: b.min,
                    max: b.max,
                });
            }
        }

        for (name, value) in [
            ("min_volume_ratio", self.min_volume_ratio),
            ("float_value_ratio", self.float_value_ratio),
            ("max_volume_cv", self.max_volume_cv),
            ("band_deviations", self.band_deviations),
            ("min_band_headroom_pct", self.min_band_headroom_pct),
            ("min_intraday_excess_pct", self.min_intraday_excess_pct),
        ] {
            if !value.is_finite() {
                return Err(ThresholdError::NotFinite { name, value });
            }
        }

        Ok(())
    }
}
