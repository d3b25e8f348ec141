//! Verdicts and rejection reasons.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a symbol left the chain. Variant order is chain order, with the
/// catch-all last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InsufficientHistory,
    NoValuationData,
    PriceMoveOutOfRange,
    VolumeRatioTooLow,
    TurnoverOutOfRange,
    MarketValueOutOfRange,
    VolumeUnstable,
    BandResistance,
    WeakIntraday,
    EvaluationError,
}

impl RejectionReason {
    pub const ALL: [RejectionReason; 10] = [
        RejectionReason::InsufficientHistory,
        RejectionReason::NoValuationData,
        RejectionReason::PriceMoveOutOfRange,
        RejectionReason::VolumeRatioTooLow,
        RejectionReason::TurnoverOutOfRange,
        RejectionReason::MarketValueOutOfRange,
        RejectionReason::VolumeUnstable,
        RejectionReason::BandResistance,
        RejectionReason::WeakIntraday,
        RejectionReason::EvaluationError,
    ];

    /// Position in the chain, 1-based. The catch-all has no stage.
    pub fn stage(&self) -> Option<usize> {
        match self {
            RejectionReason::EvaluationError => None,
            other => Self::ALL.iter().position(|r| r == other).map(|i| i + 1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RejectionReason::InsufficientHistory => "insufficient history",
            RejectionReason::NoValuationData => "no valuation data",
            RejectionReason::PriceMoveOutOfRange => "price move out of range",
            RejectionReason::VolumeRatioTooLow => "volume ratio too low",
            RejectionReason::TurnoverOutOfRange => "turnover out of range",
            RejectionReason::MarketValueOutOfRange => "float market value out of range",
            RejectionReason::VolumeUnstable => "volume unstable",
            RejectionReason::BandResistance => "upper band resistance",
            RejectionReason::WeakIntraday => "weak intraday",
            RejectionReason::EvaluationError => "evaluation error",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything computed on the way through the chain, retained for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenMetrics {
    /// Daily close-to-close move, percent.
    pub pct_change: f64,
    pub volume_ratio: f64,
    /// Traded value over total market value, percent.
    pub turnover_rate_estimate: f64,
    /// Currency units.
    pub float_mv_estimate: f64,
    pub volume_cv: f64,
    /// Distance below the upper band, percent of close.
    pub band_distance: f64,
    /// Intraday session return minus benchmark return, percentage points.
    pub intraday_relative_strength: f64,
    /// Intraday session return, percent.
    pub intraday_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verdict {
    Passed {
        symbol: String,
        metrics: ScreenMetrics,
    },
    Rejected {
        symbol: String,
        reason: RejectionReason,
    },
}

impl Verdict {
    pub fn symbol(&self) -> &str {
        match self {
            Verdict::Passed { symbol, .. } | Verdict::Rejected { symbol, .. } => symbol,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Verdict::Passed { .. })
    }

    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            Verdict::Passed { .. } => None,
            Verdict::Rejected { reason, .. } => Some(*reason),
        }
    }

    pub fn metrics(&self) -> Option<&ScreenMetrics> {
        match self {
            Verdict::Passed { metrics, .. } => Some(metrics),
            Verdict::Rejected { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_follow_chain_order() {
        assert_eq!(RejectionReason::InsufficientHistory.stage(), Some(1));
        assert_eq!(RejectionReason::BandResistance.stage(), Some(8));
        assert_eq!(RejectionReason::WeakIntraday.stage(), Some(9));
        assert_eq!(RejectionReason::EvaluationError.stage(), None);
    }

    #[test]
    fn reasons_sort_in_chain_order() {
        let mut shuffled = RejectionReason::ALL;
        shuffled.reverse();
        shuffled.sort();
        assert_eq!(shuffled, RejectionReason::ALL);
    }

    #[test]
    fn verdict_accessors() {
        let v = Verdict::Rejected {
            symbol: "600000".into(),
            reason: RejectionReason::VolumeUnstable,
        };
        assert_eq!(v.symbol(), "600000");
        assert!(!v.is_passed());
        assert_eq!(v.reason(), Some(RejectionReason::VolumeUnstable));
        assert!(v.metrics().is_none());
    }

    #[test]
    fn reason_serializes_snake_case() {
        let json = serde_json::to_string(&RejectionReason::NoValuationData).unwrap();
        assert_eq!(json, "\"no_valuation_data\"");
    }
}
