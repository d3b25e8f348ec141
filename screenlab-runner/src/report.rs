//! Reporting — plain-text summary and versioned JSON export.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use screenlab_core::screen::{BenchmarkReturn, RejectionReason};

use crate::config::{ConfigFingerprint, ScreenConfig};
use crate::result::RunResult;

/// Current schema version for exported reports.
pub const SCHEMA_VERSION: u32 = 1;

/// A run result plus the provenance needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub schema_version: u32,
    pub config_fingerprint: ConfigFingerprint,
    pub config: ScreenConfig,
    pub result: RunResult,
}

impl ScreenReport {
    pub fn new(config: &ScreenConfig, result: RunResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            config_fingerprint: config.fingerprint(),
            config: config.clone(),
            result,
        }
    }
}

/// Serialize a report to pretty JSON.
pub fn export_json(report: &ScreenReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize ScreenReport to JSON")
}

/// Deserialize a report, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ScreenReport> {
    let report: ScreenReport =
        serde_json::from_str(json).context("failed to deserialize ScreenReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

/// Write a report as JSON, creating parent directories.
pub fn save_json(report: &ScreenReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, export_json(report)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Human-readable summary of a run.
pub fn render_summary(result: &RunResult) -> String {
    let mut out = String::new();
    let market = &result.market;
    match market.benchmark_return {
        BenchmarkReturn::Resolved(pct) => {
            let _ = writeln!(out, "Benchmark {}:  {pct:+.2}%", market.benchmark);
        }
        BenchmarkReturn::Fallback => {
            let _ = writeln!(
                out,
                "Benchmark {}:  unavailable, assumed flat (0.00%)",
                market.benchmark
            );
        }
    }

    let _ = writeln!(out, "Processed:       {}", result.total_processed);
    let _ = writeln!(out, "Selected:        {}", result.selected.len());

    for p in &result.passed {
        let m = &p.metrics;
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", p.symbol);
        let _ = writeln!(out, "  move            {:.2}%", m.pct_change);
        let _ = writeln!(out, "  volume ratio    {:.2}", m.volume_ratio);
        let _ = writeln!(out, "  turnover (est)  {:.2}%", m.turnover_rate_estimate);
        let _ = writeln!(out, "  float mv (est)  {:.2}e8", m.float_mv_estimate / 1e8);
        let _ = writeln!(out, "  volume cv       {:.2}", m.volume_cv);
        let _ = writeln!(out, "  band headroom   {:.2}%", m.band_distance);
        let _ = writeln!(
            out,
            "  intraday        {:+.2}% ({:+.2} vs benchmark)",
            m.intraday_return, m.intraday_relative_strength
        );
    }

    if result.rejected_count() > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "Rejected:");
        for reason in RejectionReason::ALL {
            let count = result.count_for(reason);
            if count > 0 {
                let _ = writeln!(
                    out,
                    "  {:<32} {:>6} ({:.2}%)",
                    reason.label(),
                    count,
                    result.share_pct(reason)
                );
            }
        }
    }
    out
}
