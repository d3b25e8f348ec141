//! DailyBar — one trading session of OHLCV data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol on a single session.
///
/// Bars are immutable once fetched. A series is ordered chronologically,
/// most recent last, with at most one bar per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

/// Chronologically ordered daily bars for one symbol.
pub type DailySeries = Vec<DailyBar>;

impl DailyBar {
    /// A close the filter chain can divide by: finite and strictly positive.
    pub fn has_usable_close(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }

    /// First inconsistency in the row, if any: a non-finite or non-positive
    /// price, or open/close outside the `[low, high]` range.
    pub fn defect(&self) -> Option<&'static str> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Some("non-finite price");
        }
        if prices.iter().any(|&p| p <= 0.0) {
            return Some("non-positive price");
        }
        if self.low > self.high {
            return Some("low above high");
        }
        if !(self.low..=self.high).contains(&self.open) || !(self.low..=self.high).contains(&self.close) {
            return Some("open or close outside the low-high range");
        }
        None
    }
}
