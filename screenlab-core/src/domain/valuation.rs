//! Valuation snapshot — float share and total market value at evaluation time.

use serde::{Deserialize, Serialize};

/// Share of total shares assumed freely tradable when no float count is published.
///
/// A business-rule approximation, not an observed figure.
pub const DEFAULT_FLOAT_SHARE_RATIO: f64 = 0.7;

/// Valuation of one symbol at evaluation time.
///
/// Either field may be unresolved (`None`). Unresolved is never the same as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValuationSnapshot {
    pub float_share_estimate: Option<f64>,
    pub total_market_value: Option<f64>,
}

impl ValuationSnapshot {
    pub fn new(float_share_estimate: Option<f64>, total_market_value: Option<f64>) -> Self {
        Self {
            float_share_estimate,
            total_market_value,
        }
    }

    /// Nothing resolved.
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Derive the float estimate from total market value and the latest price:
    /// `total_market_value / last_price * float_share_ratio`.
    ///
    /// A missing or non-positive price leaves the float estimate unresolved.
    pub fn from_market_value(
        total_market_value: Option<f64>,
        last_price: Option<f64>,
        float_share_ratio: f64,
    ) -> Self {
        let float_share_estimate = match (total_market_value, last_price) {
            (Some(mv), Some(price)) if price > 0.0 => Some(mv / price * float_share_ratio),
            _ => None,
        };
        Self {
            float_share_estimate,
            total_market_value,
        }
    }

    /// Both fields as usable positive numbers, or `None`.
    pub fn resolved(&self) -> Option<(f64, f64)> {
        match (self.float_share_estimate, self.total_market_value) {
            (Some(float), Some(mv)) if usable(float) && usable(mv) => Some((float, mv)),
            _ => None,
        }
    }
}

fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
