//! Shared fixtures: a fully passing symbol ("scenario A") plus knobs to
//! break it at a chosen stage.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, NaiveDate};
use screenlab_core::data::{DataError, DataProvider, InMemoryProvider};
use screenlab_core::domain::{
    DailyBar, DailySeries, IntradayTick, SessionWindow, ValuationSnapshot,
};
use screenlab_core::screen::MarketContext;

pub const SYMBOL: &str = "600000";
pub const BENCHMARK: &str = "000300";

/// One symbol's complete inputs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub closes: Vec<f64>,
    pub volumes: Vec<u64>,
    pub valuation: ValuationSnapshot,
    pub ticks: Vec<IntradayTick>,
}

impl Scenario {
    /// 25 sessions oscillating 94/106, previous close 100, today 104 (+4%).
    /// Volume 10M today vs 8M before (ratio 1.25), total market value 1.5e10
    /// (turnover ~6.9%, float value 1.05e10), volume CV ~0.095, band
    /// headroom ~7.4%, intraday +2% with the close above the intraday mean.
    pub fn passing() -> Self {
        let mut closes: Vec<f64> = (0..23).map(|i| if i % 2 == 0 { 94.0 } else { 106.0 }).collect();
        closes.push(100.0);
        closes.push(104.0);

        let mut volumes = vec![8_000_000u64; 24];
        volumes.push(10_000_000);

        let mut s = Self {
            closes,
            volumes,
            valuation: ValuationSnapshot::from_market_value(Some(1.5e10), Some(104.0), 0.7),
            ticks: Vec::new(),
        };
        s.ticks = ticks_rising_to(104.0);
        s
    }

    /// Replace today's close; intraday ticks follow so only stage 3 moves.
    pub fn with_today_close(mut self, close: f64) -> Self {
        if let Some(last) = self.closes.last_mut() {
            *last = close;
        }
        self.ticks = ticks_rising_to(close);
        self
    }

    pub fn with_today_volume(mut self, volume: u64) -> Self {
        if let Some(last) = self.volumes.last_mut() {
            *last = volume;
        }
        self
    }

    pub fn with_total_market_value(mut self, mv: Option<f64>) -> Self {
        self.valuation.total_market_value = mv;
        self
    }

    pub fn with_ticks(mut self, ticks: Vec<IntradayTick>) -> Self {
        self.ticks = ticks;
        self
    }

    /// Keep only the last `n` sessions.
    pub fn truncated(mut self, n: usize) -> Self {
        let cut = self.closes.len().saturating_sub(n);
        self.closes.drain(..cut);
        self.volumes.drain(..cut);
        self
    }

    pub fn bars(&self) -> DailySeries {
        let base = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        self.closes
            .iter()
            .zip(&self.volumes)
            .enumerate()
            .map(|(i, (&close, &volume))| {
                let open = if i == 0 { close } else { self.closes[i - 1] };
                DailyBar {
                    date: base + Duration::days(i as i64),
                    open,
                    close,
                    high: open.max(close) + 0.5,
                    low: open.min(close) - 0.5,
                    volume,
                }
            })
            .collect()
    }

    pub fn add_to(&self, provider: InMemoryProvider, symbol: &str) -> InMemoryProvider {
        provider
            .with_daily(symbol, self.bars())
            .with_valuation(symbol, self.valuation)
            .with_intraday(symbol, self.ticks.clone())
    }

    pub fn provider(&self) -> InMemoryProvider {
        self.add_to(InMemoryProvider::new(), SYMBOL)
            .with_benchmark(BENCHMARK, benchmark_bars(&[3990.0, 4000.0, 4020.0]))
    }
}

/// 31 one-minute ticks from 14:30 to 15:00 rising linearly by 2% to `close`.
pub fn ticks_rising_to(close: f64) -> Vec<IntradayTick> {
    let start = close / 1.02;
    ticks_between(start, close)
}

pub fn ticks_between(first: f64, last: f64) -> Vec<IntradayTick> {
    let day = NaiveDate::from_ymd_opt(2024, 2, 25).unwrap();
    (0..=30)
        .map(|m| IntradayTick {
            timestamp: day.and_hms_opt(14, 30, 0).unwrap() + Duration::minutes(m),
            price: first + (last - first) * m as f64 / 30.0,
        })
        .collect()
}

pub fn benchmark_bars(closes: &[f64]) -> DailySeries {
    let base = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| DailyBar {
            date: base + Duration::days(i as i64),
            open: close,
            close,
            high: close,
            low: close,
            volume: 0,
        })
        .collect()
}

/// Benchmark at +0.5%.
pub fn market() -> MarketContext {
    MarketContext::resolved(BENCHMARK, 0.5)
}

pub fn window() -> SessionWindow {
    SessionWindow::default()
}

/// Wraps a provider and counts which fetches were made.
pub struct Tripwire<P> {
    pub inner: P,
    pub valuation_calls: AtomicUsize,
    pub intraday_calls: AtomicUsize,
    pub fail_intraday: bool,
    pub fail_valuation: bool,
}

impl<P: DataProvider> Tripwire<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            valuation_calls: AtomicUsize::new(0),
            intraday_calls: AtomicUsize::new(0),
            fail_intraday: false,
            fail_valuation: false,
        }
    }

    pub fn intraday_calls(&self) -> usize {
        self.intraday_calls.load(Ordering::SeqCst)
    }

    pub fn valuation_calls(&self) -> usize {
        self.valuation_calls.load(Ordering::SeqCst)
    }
}

impl<P: DataProvider> DataProvider for Tripwire<P> {
    fn name(&self) -> &str {
        "tripwire"
    }

    fn fetch_daily_series(&self, symbol: &str) -> Result<DailySeries, DataError> {
        self.inner.fetch_daily_series(symbol)
    }

    fn fetch_valuation(&self, symbol: &str) -> Result<ValuationSnapshot, DataError> {
        self.valuation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_valuation {
            return Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "valuation source down".into(),
            });
        }
        self.inner.fetch_valuation(symbol)
    }

    fn fetch_intraday(
        &self,
        symbol: &str,
        window: &SessionWindow,
    ) -> Result<Vec<IntradayTick>, DataError> {
        self.intraday_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_intraday {
            return Err(DataError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "minute feed down".into(),
            });
        }
        self.inner.fetch_intraday(symbol, window)
    }

    fn fetch_benchmark_series(&self, index_symbol: &str) -> Result<DailySeries, DataError> {
        self.inner.fetch_benchmark_series(index_symbol)
    }
}
