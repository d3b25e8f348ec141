//! In-memory data provider.
//!
//! Holds pre-built series in maps. Used by tests and by callers that
//! already have their data loaded.

use std::collections::HashMap;

use super::provider::{DataError, DataProvider};
use crate::domain::tick::latest_session_ticks;
use crate::domain::{DailySeries, IntradayTick, SessionWindow, ValuationSnapshot};

#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    daily: HashMap<String, DailySeries>,
    valuations: HashMap<String, ValuationSnapshot>,
    intraday: HashMap<String, Vec<IntradayTick>>,
    benchmarks: HashMap<String, DailySeries>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_daily(mut self, symbol: impl Into<String>, bars: DailySeries) -> Self {
        self.daily.insert(symbol.into(), bars);
        self
    }

    pub fn with_valuation(mut self, symbol: impl Into<String>, snapshot: ValuationSnapshot) -> Self {
        self.valuations.insert(symbol.into(), snapshot);
        self
    }

    pub fn with_intraday(mut self, symbol: impl Into<String>, ticks: Vec<IntradayTick>) -> Self {
        self.intraday.insert(symbol.into(), ticks);
        self
    }

    pub fn with_benchmark(mut self, index_symbol: impl Into<String>, bars: DailySeries) -> Self {
        self.benchmarks.insert(index_symbol.into(), bars);
        self
    }

    /// Number of symbols with daily data.
    pub fn symbol_count(&self) -> usize {
        self.daily.len()
    }
}

impl DataProvider for InMemoryProvider {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn fetch_daily_series(&self, symbol: &str) -> Result<DailySeries, DataError> {
        self.daily
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }

    fn fetch_valuation(&self, symbol: &str) -> Result<ValuationSnapshot, DataError> {
        Ok(self.valuations.get(symbol).copied().unwrap_or_default())
    }

    fn fetch_intraday(
        &self,
        symbol: &str,
        window: &SessionWindow,
    ) -> Result<Vec<IntradayTick>, DataError> {
        let ticks = self.intraday.get(symbol).cloned().unwrap_or_default();
        Ok(latest_session_ticks(ticks, window))
    }

    fn fetch_benchmark_series(&self, index_symbol: &str) -> Result<DailySeries, DataError> {
        self.benchmarks
            .get(index_symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: index_symbol.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn unknown_symbol_is_not_found() {
        let p = InMemoryProvider::new();
        assert!(matches!(
            p.fetch_daily_series("NOPE"),
            Err(DataError::SymbolNotFound { .. })
        ));
        assert!(p.fetch_benchmark_series("000300").is_err());
    }

    #[test]
    fn missing_valuation_is_unresolved_not_error() {
        let p = InMemoryProvider::new();
        let v = p.fetch_valuation("ANY").unwrap();
        assert!(v.resolved().is_none());
    }

    #[test]
    fn missing_intraday_is_empty() {
        let p = InMemoryProvider::new();
        let ticks = p.fetch_intraday("ANY", &SessionWindow::default()).unwrap();
        assert!(ticks.is_empty());
    }

    #[test]
    fn stores_and_returns_daily() {
        let p = InMemoryProvider::new().with_daily("600000", make_bars(&[1.0, 2.0]));
        assert_eq!(p.fetch_daily_series("600000").unwrap().len(), 2);
        assert_eq!(p.symbol_count(), 1);
    }
}
