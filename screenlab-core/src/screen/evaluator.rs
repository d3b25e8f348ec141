//! SymbolEvaluator — the ordered, short-circuiting filter chain for one symbol.
//!
//! Stages, in order:
//! 1. minimum history
//! 2. valuation availability
//! 3. daily price move
//! 4. volume surge
//! 5. turnover estimate
//! 6. float market value
//! 7. volume stability
//! 8. volatility-band headroom
//! 9. intraday relative strength
//!
//! The first failing stage ends the evaluation with its reason; later
//! stages never run and their data is never fetched. Any unexpected
//! failure (provider error, malformed data) is contained in the verdict
//! as `RejectionReason::EvaluationError`.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::context::MarketContext;
use super::thresholds::ScreenThresholds;
use super::verdict::{RejectionReason, ScreenMetrics, Verdict};
use crate::data::provider::{DataError, DataProvider};
use crate::domain::{IntradayTick, SessionWindow};
use crate::indicators::{coefficient_of_variation, mean, volatility_band, volume_ratio, IndicatorError};

/// Unexpected failures while evaluating a stage.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("malformed bar: {reason}")]
    MalformedBar { reason: String },
}

/// Internal early-exit carrier: the reason plus, for unexpected failures, the cause.
#[derive(Debug)]
struct Rejection {
    reason: RejectionReason,
    cause: Option<EvaluationError>,
}

impl Rejection {
    fn new(reason: RejectionReason) -> Self {
        Self {
            reason,
            cause: None,
        }
    }

    fn with_cause(reason: RejectionReason, cause: impl Into<EvaluationError>) -> Self {
        Self {
            reason,
            cause: Some(cause.into()),
        }
    }
}

impl From<EvaluationError> for Rejection {
    fn from(e: EvaluationError) -> Self {
        Self::with_cause(RejectionReason::EvaluationError, e)
    }
}

impl From<DataError> for Rejection {
    fn from(e: DataError) -> Self {
        Self::with_cause(RejectionReason::EvaluationError, e)
    }
}

impl From<IndicatorError> for Rejection {
    fn from(e: IndicatorError) -> Self {
        Self::with_cause(RejectionReason::EvaluationError, e)
    }
}

fn require(pass: bool, reason: RejectionReason) -> Result<(), Rejection> {
    if pass {
        Ok(())
    } else {
        Err(Rejection::new(reason))
    }
}

fn malformed(reason: String) -> Rejection {
    EvaluationError::MalformedBar { reason }.into()
}

/// Intraday mean price and first-to-last session return.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IntradayStrength {
    mean_price: f64,
    session_return: f64,
}

fn intraday_strength(ticks: &[IntradayTick]) -> Result<Option<IntradayStrength>, Rejection> {
    let (Some(first), Some(last)) = (ticks.first(), ticks.last()) else {
        return Ok(None);
    };
    if let Some(bad) = ticks.iter().find(|t| !t.price.is_finite()) {
        return Err(malformed(format!(
            "intraday price at {} is {}",
            bad.timestamp, bad.price
        )));
    }
    if first.price <= 0.0 {
        return Err(malformed(format!(
            "first intraday price at {} is {}",
            first.timestamp, first.price
        )));
    }
    let prices: Vec<f64> = ticks.iter().map(|t| t.price).collect();
    Ok(Some(IntradayStrength {
        mean_price: mean(&prices),
        session_return: (last.price - first.price) / first.price * 100.0,
    }))
}

/// Runs the filter chain for one symbol at a time.
///
/// Holds only shared references; one evaluator can serve any number of
/// threads, and evaluating one symbol never affects another.
#[derive(Clone, Copy)]
pub struct SymbolEvaluator<'a> {
    provider: &'a dyn DataProvider,
    thresholds: &'a ScreenThresholds,
    market: &'a MarketContext,
    window: SessionWindow,
}

impl<'a> SymbolEvaluator<'a> {
    pub fn new(
        provider: &'a dyn DataProvider,
        thresholds: &'a ScreenThresholds,
        market: &'a MarketContext,
    ) -> Self {
        Self {
            provider,
            thresholds,
            market,
            window: SessionWindow::default(),
        }
    }

    pub fn with_session_window(mut self, window: SessionWindow) -> Self {
        self.window = window;
        self
    }

    /// Evaluate one symbol. Never fails: every outcome is a verdict.
    pub fn evaluate(&self, symbol: &str) -> Verdict {
        match self.run_chain(symbol) {
            Ok(metrics) => {
                info!(
                    symbol,
                    pct_change = metrics.pct_change,
                    volume_ratio = metrics.volume_ratio,
                    turnover = metrics.turnover_rate_estimate,
                    float_mv = metrics.float_mv_estimate,
                    volume_cv = metrics.volume_cv,
                    band_distance = metrics.band_distance,
                    intraday_return = metrics.intraday_return,
                    benchmark_return = self.market.benchmark_return(),
                    "passed all filters"
                );
                Verdict::Passed {
                    symbol: symbol.to_string(),
                    metrics,
                }
            }
            Err(Rejection { reason, cause }) => {
                match cause {
                    Some(e) => warn!(symbol, %reason, error = %e, "evaluation failed"),
                    None => debug!(symbol, %reason, "rejected"),
                }
                Verdict::Rejected {
                    symbol: symbol.to_string(),
                    reason,
                }
            }
        }
    }

    fn run_chain(&self, symbol: &str) -> Result<ScreenMetrics, Rejection> {
        let t = self.thresholds;
        let bars = self.provider.fetch_daily_series(symbol)?;

        // 1. minimum history
        require(bars.len() >= t.min_history, RejectionReason::InsufficientHistory)?;

        // 2. valuation availability; an unreachable source counts as unresolved
        let valuation = self
            .provider
            .fetch_valuation(symbol)
            .map_err(|e| Rejection::with_cause(RejectionReason::NoValuationData, e))?;
        let (_float_shares, total_mv) = valuation
            .resolved()
            .ok_or_else(|| Rejection::new(RejectionReason::NoValuationData))?;

        let [.., prev, today] = bars.as_slice() else {
            return Err(malformed(format!("need two sessions, have {}", bars.len())));
        };
        if !prev.has_usable_close() || !today.has_usable_close() {
            return Err(malformed(format!(
                "unusable closes on {} ({}) / {} ({})",
                prev.date, prev.close, today.date, today.close
            )));
        }

        // 3. daily price move
        let pct_change = (today.close - prev.close) / prev.close * 100.0;
        require(
            t.price_move_pct.contains(pct_change),
            RejectionReason::PriceMoveOutOfRange,
        )?;

        // 4. volume surge against the prior sessions
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
        let today_volume = today.volume as f64;
        let volume_ratio = volume_ratio(today_volume, &volumes[..volumes.len() - 1]);
        require(
            volume_ratio >= t.min_volume_ratio,
            RejectionReason::VolumeRatioTooLow,
        )?;

        // 5. turnover estimate
        let turnover_rate_estimate = today_volume * today.close / total_mv * 100.0;
        require(
            t.turnover_pct.contains(turnover_rate_estimate),
            RejectionReason::TurnoverOutOfRange,
        )?;

        // 6. float market value
        let float_mv_estimate = total_mv * t.float_value_ratio;
        require(
            t.float_market_value.contains(float_mv_estimate),
            RejectionReason::MarketValueOutOfRange,
        )?;

        // 7. volume stability, window includes today
        let volume_cv = coefficient_of_variation(&volumes);
        require(volume_cv <= t.max_volume_cv, RejectionReason::VolumeUnstable)?;

        // 8. headroom below the upper band
        let window_start = bars.len().saturating_sub(t.band_window);
        if let Some(bad) = bars[window_start..].iter().find(|b| !b.close.is_finite()) {
            return Err(malformed(format!("non-finite close on {}", bad.date)));
        }
        let band = volatility_band(&bars, t.band_window, t.band_deviations)?;
        let band_distance = band.headroom_pct(today.close);
        require(
            band_distance >= t.min_band_headroom_pct,
            RejectionReason::BandResistance,
        )?;

        // 9. intraday relative strength
        let ticks = self.provider.fetch_intraday(symbol, &self.window)?;
        let strength = intraday_strength(&ticks)?
            .ok_or_else(|| Rejection::new(RejectionReason::WeakIntraday))?;
        let benchmark = self.market.benchmark_return();
        require(
            today.close >= strength.mean_price
                && strength.session_return >= benchmark + t.min_intraday_excess_pct,
            RejectionReason::WeakIntraday,
        )?;

        Ok(ScreenMetrics {
            pct_change,
            volume_ratio,
            turnover_rate_estimate,
            float_mv_estimate,
            volume_cv,
            band_distance,
            intraday_relative_strength: strength.session_return - benchmark,
            intraday_return: strength.session_return,
        })
    }
}
