//! Serializable screening configuration.
//!
//! Every section is optional in the TOML file; omitted fields take the
//! defaults below.
//!
//! ```toml
//! [benchmark]
//! symbol = "000300"
//! alternates = ["sh000300"]
//!
//! [intraday]
//! start = "14:30:00"
//! end = "15:00:00"
//!
//! [thresholds]
//! min_history = 20
//! price_move_pct = { min = 3.0, max = 5.0 }
//!
//! [execution]
//! parallel = false
//! progress_interval = 100
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use screenlab_core::domain::SessionWindow;
use screenlab_core::screen::{ScreenThresholds, ThresholdError};

/// Unique identifier for a configuration (content-addressable hash).
pub type ConfigFingerprint = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid thresholds: {0}")]
    Thresholds(#[from] ThresholdError),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Benchmark index used as the relative-strength baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub symbol: String,
    /// Tried in order when the primary symbol cannot be resolved.
    pub alternates: Vec<String>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            symbol: "000300".into(),
            alternates: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Evaluate symbols on the rayon pool.
    pub parallel: bool,
    /// Log progress every N symbols; 0 disables.
    pub progress_interval: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            progress_interval: 100,
        }
    }
}

/// Complete configuration of one screening run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub benchmark: BenchmarkConfig,
    pub intraday: SessionWindow,
    pub thresholds: ScreenThresholds,
    pub execution: ExecutionConfig,
}

impl ScreenConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.benchmark.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("benchmark.symbol is empty".into()));
        }
        if self.intraday.start > self.intraday.end {
            return Err(ConfigError::Invalid(format!(
                "intraday window starts after it ends ({} > {})",
                self.intraday.start, self.intraday.end
            )));
        }
        self.thresholds.validate()?;
        Ok(())
    }

    /// Deterministic BLAKE3 hash of the serialized configuration.
    ///
    /// Two runs with identical configs share a fingerprint.
    pub fn fingerprint(&self) -> ConfigFingerprint {
        // serializing plain data to JSON cannot fail; an empty string still hashes
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
