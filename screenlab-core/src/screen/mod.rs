//! The screening filter chain.
//!
//! - `thresholds`: every numeric cut-off of the chain as a named parameter
//! - `context`: benchmark session return shared by all symbols in a run
//! - `evaluator`: the ordered, short-circuiting per-symbol chain
//! - `verdict`: pass/fail outcomes and rejection reasons

pub mod context;
pub mod evaluator;
pub mod thresholds;
pub mod verdict;

pub use context::{compute_benchmark_return, session_return, BenchmarkReturn, MarketContext};
pub use evaluator::{EvaluationError, SymbolEvaluator};
pub use thresholds::{Bounds, ScreenThresholds, ThresholdError, FLOAT_VALUE_RATIO};
pub use verdict::{RejectionReason, ScreenMetrics, Verdict};
