//! Universe configuration — sector-organized ticker lists.
//!
//! The universe is stored as a TOML file with a `[sectors]` table whose
//! entries are ticker lists:
//!
//! ```toml
//! [sectors]
//! banks = ["600000", "601398"]
//! tech = ["000063", "002415"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::provider::DataError;

/// The complete universe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Universe {
    #[serde(default)]
    pub sectors: BTreeMap<String, Vec<String>>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::Io(format!("read universe file {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        toml::from_str(content).map_err(|e| DataError::Malformed(format!("parse universe TOML: {e}")))
    }

    /// All tickers across all sectors, in sector order, first occurrence wins.
    pub fn all_tickers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sectors
            .values()
            .flat_map(|tickers| tickers.iter().map(|t| t.as_str()))
            .filter(|t| seen.insert(*t))
            .collect()
    }

    /// Get tickers for a specific sector.
    pub fn sector_tickers(&self, sector: &str) -> Option<&[String]> {
        self.sectors.get(sector).map(|v| v.as_slice())
    }

    /// Number of distinct tickers.
    pub fn ticker_count(&self) -> usize {
        self.all_tickers().len()
    }
}
