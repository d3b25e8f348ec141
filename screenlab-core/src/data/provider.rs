//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (CSV directories,
//! in-memory fixtures, remote vendors) so the filter chain can consume
//! them as a black box and tests can substitute their own.

use thiserror::Error;

use crate::domain::{DailySeries, IntradayTick, SessionWindow, ValuationSnapshot};

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data unavailable for '{symbol}': {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("malformed data: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Source of daily bars, valuation snapshots, intraday ticks and index levels.
///
/// Each call may be slow (network-bound). Implementations own their own
/// timeout and retry policy; the core only sees the final `Result`.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Daily bars for a symbol, chronologically ordered, most recent last.
    fn fetch_daily_series(&self, symbol: &str) -> Result<DailySeries, DataError>;

    /// Valuation snapshot. Fields may legitimately be unresolved.
    fn fetch_valuation(&self, symbol: &str) -> Result<ValuationSnapshot, DataError>;

    /// Ticks of the latest session restricted to `window`. May be empty.
    fn fetch_intraday(
        &self,
        symbol: &str,
        window: &SessionWindow,
    ) -> Result<Vec<IntradayTick>, DataError>;

    /// Daily levels of a benchmark index, most recent last.
    fn fetch_benchmark_series(&self, index_symbol: &str) -> Result<DailySeries, DataError>;
}
