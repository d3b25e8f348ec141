//! Market context — the benchmark session return every symbol is compared to.
//!
//! Resolved once per run and shared read-only. A benchmark that cannot be
//! fetched degrades to a flat market (0.0) instead of failing the run, and
//! the degradation is kept visible as `BenchmarkReturn::Fallback`.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::evaluator::EvaluationError;
use crate::data::provider::DataProvider;
use crate::domain::DailyBar;

/// Benchmark session return, or the neutral fallback used when no source resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "pct", rename_all = "snake_case")]
pub enum BenchmarkReturn {
    Resolved(f64),
    Fallback,
}

impl BenchmarkReturn {
    /// Percentage return; the fallback reads as flat.
    pub fn value(&self) -> f64 {
        match self {
            BenchmarkReturn::Resolved(pct) => *pct,
            BenchmarkReturn::Fallback => 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, BenchmarkReturn::Fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    /// Index symbol that resolved, or the primary one when none did.
    pub benchmark: String,
    pub benchmark_return: BenchmarkReturn,
}

impl MarketContext {
    /// Try `primary`, then each alternate in order. Falls back to a flat
    /// market only when every source fails.
    pub fn resolve(provider: &dyn DataProvider, primary: &str, alternates: &[String]) -> Self {
        let candidates = std::iter::once(primary).chain(alternates.iter().map(|s| s.as_str()));
        for index_symbol in candidates {
            match compute_benchmark_return(provider, index_symbol) {
                Ok(pct) => {
                    info!(benchmark = index_symbol, pct, "benchmark return resolved");
                    return Self::resolved(index_symbol, pct);
                }
                Err(e) => {
                    warn!(benchmark = index_symbol, error = %e, "benchmark unavailable");
                }
            }
        }
        warn!(
            benchmark = primary,
            "no benchmark source resolved; treating market as flat (0.0%)"
        );
        Self {
            benchmark: primary.to_string(),
            benchmark_return: BenchmarkReturn::Fallback,
        }
    }

    pub fn resolved(benchmark: impl Into<String>, pct: f64) -> Self {
        Self {
            benchmark: benchmark.into(),
            benchmark_return: BenchmarkReturn::Resolved(pct),
        }
    }

    pub fn benchmark_return(&self) -> f64 {
        self.benchmark_return.value()
    }
}

/// `(latest_close - previous_close) / previous_close * 100` of an index.
pub fn compute_benchmark_return(
    provider: &dyn DataProvider,
    index_symbol: &str,
) -> Result<f64, EvaluationError> {
    let series = provider.fetch_benchmark_series(index_symbol)?;
    session_return(&series)
}

/// Close-to-close return of the last two bars, percent.
pub fn session_return(series: &[DailyBar]) -> Result<f64, EvaluationError> {
    let [.., prev, today] = series else {
        return Err(EvaluationError::MalformedBar {
            reason: format!("need two sessions for a return, have {}", series.len()),
        });
    };
    if !prev.has_usable_close() || !today.close.is_finite() {
        return Err(EvaluationError::MalformedBar {
            reason: format!(
                "unusable closes on {} ({}) / {} ({})",
                prev.date, prev.close, today.date, today.close
            ),
        });
    }
    Ok((today.close - prev.close) / prev.close * 100.0)
}
