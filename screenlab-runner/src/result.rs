//! RunResult — the fold of every verdict in a screening run.
//!
//! Built by folding verdicts in input order rather than mutating shared
//! counters, so sequential and parallel runs reduce to the same value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use screenlab_core::screen::{MarketContext, RejectionReason, ScreenMetrics, Verdict};

/// A symbol that passed every stage, with its metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassedSymbol {
    pub symbol: String,
    pub metrics: ScreenMetrics,
}

/// Outcome of one screening run.
///
/// Invariant: `total_processed == selected.len() + sum(rejection_counts)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Passing symbols in input order.
    pub selected: Vec<String>,
    /// Count per reason; reasons that never occurred are absent.
    pub rejection_counts: BTreeMap<RejectionReason, usize>,
    pub total_processed: usize,
    /// Metrics of each passing symbol, parallel to `selected`.
    pub passed: Vec<PassedSymbol>,
    /// Benchmark the run compared against.
    pub market: MarketContext,
}

impl RunResult {
    pub fn empty(market: MarketContext) -> Self {
        Self {
            selected: Vec::new(),
            rejection_counts: BTreeMap::new(),
            total_processed: 0,
            passed: Vec::new(),
            market,
        }
    }

    /// Fold verdicts, in order, into a result.
    pub fn from_verdicts(market: MarketContext, verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        verdicts.into_iter().fold(Self::empty(market), Self::absorb)
    }

    /// Add one verdict.
    pub fn absorb(mut self, verdict: Verdict) -> Self {
        self.total_processed += 1;
        match verdict {
            Verdict::Passed { symbol, metrics } => {
                self.selected.push(symbol.clone());
                self.passed.push(PassedSymbol { symbol, metrics });
            }
            Verdict::Rejected { reason, .. } => {
                *self.rejection_counts.entry(reason).or_insert(0) += 1;
            }
        }
        self
    }

    /// Append `other` after `self`. Associative; counts commute.
    pub fn merge(mut self, other: Self) -> Self {
        self.total_processed += other.total_processed;
        self.selected.extend(other.selected);
        self.passed.extend(other.passed);
        for (reason, count) in other.rejection_counts {
            *self.rejection_counts.entry(reason).or_insert(0) += count;
        }
        self
    }

    pub fn rejected_count(&self) -> usize {
        self.rejection_counts.values().sum()
    }

    pub fn count_for(&self, reason: RejectionReason) -> usize {
        self.rejection_counts.get(&reason).copied().unwrap_or(0)
    }

    /// Share of processed symbols rejected for `reason`, percent.
    pub fn share_pct(&self, reason: RejectionReason) -> f64 {
        if self.total_processed == 0 {
            return 0.0;
        }
        self.count_for(reason) as f64 / self.total_processed as f64 * 100.0
    }

    /// The accounting invariant holds.
    pub fn is_balanced(&self) -> bool {
        self.total_processed == self.selected.len() + self.rejected_count()
            && self.selected.len() == self.passed.len()
    }
}
