//! Screening runner — resolves the market context once, evaluates every
//! symbol, and folds the verdicts into a `RunResult`.
//!
//! Sequential and parallel modes produce identical results: verdicts are
//! collected in input order and folded after evaluation, and the market
//! context is shared read-only.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::info;

use screenlab_core::data::DataProvider;
use screenlab_core::screen::{MarketContext, SymbolEvaluator, Verdict};

use crate::config::{ConfigError, ScreenConfig};
use crate::result::RunResult;

/// One screening run over a ticker universe.
pub struct ScreeningRun<'a> {
    provider: &'a dyn DataProvider,
    config: &'a ScreenConfig,
}

impl<'a> ScreeningRun<'a> {
    /// Fails when `config` does not validate; configs built in code get the
    /// same checks as ones loaded from TOML.
    pub fn new(provider: &'a dyn DataProvider, config: &'a ScreenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    /// Resolve a fresh market context from the configured benchmark sources.
    pub fn market_context(&self) -> MarketContext {
        let bench = &self.config.benchmark;
        MarketContext::resolve(self.provider, &bench.symbol, &bench.alternates)
    }

    /// Screen `symbols` in input order.
    ///
    /// Never fails: per-symbol problems become `EvaluationError` verdicts and
    /// an unavailable benchmark degrades to a flat market.
    pub fn run(&self, symbols: &[&str]) -> RunResult {
        let market = self.market_context();
        self.run_with_market(symbols, market)
    }

    /// Screen against an already-resolved market context.
    pub fn run_with_market(&self, symbols: &[&str], market: MarketContext) -> RunResult {
        let started = Instant::now();
        let total = symbols.len();
        info!(
            provider = self.provider.name(),
            total,
            benchmark = %market.benchmark,
            benchmark_return = market.benchmark_return(),
            fallback = market.benchmark_return.is_fallback(),
            parallel = self.config.execution.parallel,
            "screening started"
        );

        let evaluator = SymbolEvaluator::new(self.provider, &self.config.thresholds, &market)
            .with_session_window(self.config.intraday);
        let done = AtomicUsize::new(0);
        let interval = self.config.execution.progress_interval;

        let evaluate = |symbol: &&str| -> Verdict {
            let verdict = evaluator.evaluate(symbol);
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if interval > 0 && n % interval == 0 {
                info!(processed = n, total, "screening progress");
            }
            verdict
        };

        let verdicts: Vec<Verdict> = if self.config.execution.parallel {
            symbols.par_iter().map(evaluate).collect()
        } else {
            symbols.iter().map(evaluate).collect()
        };

        let result = RunResult::from_verdicts(market, verdicts);
        info!(
            total = result.total_processed,
            selected = result.selected.len(),
            rejected = result.rejected_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "screening finished"
        );
        result
    }
}
