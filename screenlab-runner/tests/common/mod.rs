//! Fixtures for run-level tests: one passing symbol plus variants that
//! fail at a known stage.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use screenlab_core::data::{DataError, DataProvider, InMemoryProvider};
use screenlab_core::domain::{
    DailyBar, DailySeries, IntradayTick, SessionWindow, ValuationSnapshot,
};
use screenlab_core::screen::RejectionReason;

pub const BENCHMARK: &str = "000300";

/// Symbol shapes used to populate a universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Passing,
    ShortHistory,
    QuietVolume,
    UnstableVolume,
    FlatIntraday,
    Missing,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Passing,
        Shape::ShortHistory,
        Shape::QuietVolume,
        Shape::UnstableVolume,
        Shape::FlatIntraday,
        Shape::Missing,
    ];

    /// Outcome against a +0.5% benchmark; `None` means the symbol passes.
    pub fn expected(self) -> Option<RejectionReason> {
        match self {
            Shape::Passing => None,
            Shape::ShortHistory => Some(RejectionReason::InsufficientHistory),
            Shape::QuietVolume => Some(RejectionReason::VolumeRatioTooLow),
            Shape::UnstableVolume => Some(RejectionReason::VolumeUnstable),
            Shape::FlatIntraday => Some(RejectionReason::WeakIntraday),
            Shape::Missing => Some(RejectionReason::EvaluationError),
        }
    }

    pub fn add_to(self, provider: InMemoryProvider, symbol: &str) -> InMemoryProvider {
        let mut volumes = vec![8_000_000u64; 24];
        volumes.push(10_000_000);
        let mut closes = passing_closes();
        let mut ticks = ticks_between(104.0 / 1.02, 104.0);

        match self {
            Shape::Missing => return provider,
            Shape::Passing => {}
            Shape::ShortHistory => {
                closes.drain(..10);
                volumes.drain(..10);
            }
            // prior sessions outweigh today: ratio 10/11
            Shape::QuietVolume => volumes[19..24].fill(11_000_000),
            Shape::UnstableVolume => {
                volumes[20..].copy_from_slice(&[1_000_000, 1_000_000, 1_000_000, 17_000_000, 10_000_000]);
            }
            Shape::FlatIntraday => ticks = ticks_between(104.0, 104.0),
        }

        provider
            .with_daily(symbol, daily_bars(&closes, &volumes))
            .with_valuation(symbol, valuation())
            .with_intraday(symbol, ticks)
    }
}

/// 23 sessions alternating 94/106, then 100, then 104 (+4%).
pub fn passing_closes() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..23).map(|i| if i % 2 == 0 { 94.0 } else { 106.0 }).collect();
    closes.push(100.0);
    closes.push(104.0);
    closes
}

pub fn valuation() -> ValuationSnapshot {
    ValuationSnapshot::from_market_value(Some(1.5e10), Some(104.0), 0.7)
}

pub fn daily_bars(closes: &[f64], volumes: &[u64]) -> DailySeries {
    let base = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
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

pub fn session_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 25)
        .unwrap()
        .and_hms_opt(14, 30, 0)
        .unwrap()
}

/// 31 one-minute ticks from 14:30, linear from `first` to `last`.
pub fn ticks_between(first: f64, last: f64) -> Vec<IntradayTick> {
    (0..=30)
        .map(|m| IntradayTick {
            timestamp: session_start() + Duration::minutes(m),
            price: first + (last - first) * m as f64 / 30.0,
        })
        .collect()
}

/// Index series whose last session returns +0.5%.
pub fn benchmark_bars() -> DailySeries {
    let base = NaiveDate::from_ymd_opt(2024, 2, 20).unwrap();
    [3990.0, 4000.0, 4020.0]
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

/// Provider holding one symbol per shape, named `S{index}`, plus the benchmark.
pub fn universe_provider(shapes: &[Shape]) -> (InMemoryProvider, Vec<String>) {
    let mut provider = InMemoryProvider::new().with_benchmark(BENCHMARK, benchmark_bars());
    let mut symbols = Vec::with_capacity(shapes.len());
    for (i, shape) in shapes.iter().enumerate() {
        let symbol = format!("S{i:04}");
        provider = shape.add_to(provider, &symbol);
        symbols.push(symbol);
    }
    (provider, symbols)
}

/// Counts benchmark fetches made through it.
pub struct BenchmarkCounter<P> {
    pub inner: P,
    calls: AtomicUsize,
}

impl<P: DataProvider> BenchmarkCounter<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<P: DataProvider> DataProvider for BenchmarkCounter<P> {
    fn name(&self) -> &str {
        "benchmark_counter"
    }

    fn fetch_daily_series(&self, symbol: &str) -> Result<DailySeries, DataError> {
        self.inner.fetch_daily_series(symbol)
    }

    fn fetch_valuation(&self, symbol: &str) -> Result<ValuationSnapshot, DataError> {
        self.inner.fetch_valuation(symbol)
    }

    fn fetch_intraday(
        &self,
        symbol: &str,
        window: &SessionWindow,
    ) -> Result<Vec<IntradayTick>, DataError> {
        self.inner.fetch_intraday(symbol, window)
    }

    fn fetch_benchmark_series(&self, index_symbol: &str) -> Result<DailySeries, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_benchmark_series(index_symbol)
    }
}
