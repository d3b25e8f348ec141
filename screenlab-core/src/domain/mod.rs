//! Domain types for ScreenLab

pub mod bar;
pub mod tick;
pub mod valuation;

pub use bar::{DailyBar, DailySeries};
pub use tick::{IntradayTick, SessionWindow};
pub use valuation::{ValuationSnapshot, DEFAULT_FLOAT_SHARE_RATIO};
