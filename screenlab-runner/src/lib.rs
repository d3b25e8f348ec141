//! ScreenLab Runner — screening orchestration, configuration, reporting.
//!
//! This crate builds on `screenlab-core` to provide:
//! - TOML run configuration with validated thresholds
//! - The screening run: one market context, every symbol evaluated,
//!   verdicts folded into a `RunResult`
//! - Optional parallel evaluation with input-order results
//! - Plain-text summaries and versioned JSON reports

pub mod config;
pub mod report;
pub mod result;
pub mod runner;

pub use config::{BenchmarkConfig, ConfigError, ExecutionConfig, ScreenConfig};
pub use report::{export_json, import_json, render_summary, save_json, ScreenReport};
pub use result::{PassedSymbol, RunResult};
pub use runner::ScreeningRun;
