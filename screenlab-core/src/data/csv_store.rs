//! CSV directory provider.
//!
//! Layout under the root directory:
//!
//! ```text
//! daily/<SYMBOL>.csv      date,open,high,low,close,volume
//! index/<SYMBOL>.csv      date,open,high,low,close,volume
//! intraday/<SYMBOL>.csv   timestamp,price   (YYYY-MM-DD HH:MM:SS)
//! valuation.csv           symbol,total_market_value,last_price,float_shares
//! ```
//!
//! `last_price` and `float_shares` may be empty. When `float_shares` is
//! empty the float is estimated from total market value and `last_price`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::provider::{DataError, DataProvider};
use crate::domain::tick::latest_session_ticks;
use crate::domain::{
    DailyBar, DailySeries, IntradayTick, SessionWindow, ValuationSnapshot,
    DEFAULT_FLOAT_SHARE_RATIO,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct DailyRow {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

#[derive(Debug, Deserialize)]
struct TickRow {
    timestamp: String,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct ValuationRow {
    symbol: String,
    total_market_value: Option<f64>,
    last_price: Option<f64>,
    float_shares: Option<f64>,
}

/// Reads screening inputs from a directory of CSV files.
#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    root: PathBuf,
    valuations: HashMap<String, ValuationSnapshot>,
}

impl CsvDirectoryProvider {
    /// Open a data directory. `valuation.csv` is loaded eagerly if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DataError> {
        Self::open_with_float_ratio(root, DEFAULT_FLOAT_SHARE_RATIO)
    }

    /// Like [`open`](Self::open) with a custom float share ratio for rows
    /// that carry no published float.
    pub fn open_with_float_ratio(
        root: impl Into<PathBuf>,
        float_share_ratio: f64,
    ) -> Result<Self, DataError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DataError::Io(format!(
                "data directory does not exist: {}",
                root.display()
            )));
        }
        let valuation_path = root.join("valuation.csv");
        let valuations = if valuation_path.exists() {
            load_valuations(&valuation_path, float_share_ratio)?
        } else {
            HashMap::new()
        };
        Ok(Self { root, valuations })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn symbol_file(&self, dir: &str, symbol: &str) -> Result<PathBuf, DataError> {
        let path = self.root.join(dir).join(format!("{symbol}.csv"));
        if path.exists() {
            Ok(path)
        } else {
            Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
        }
    }
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>, DataError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::Io(format!("{}: {e}", path.display())))
}

fn malformed(path: &Path, e: impl std::fmt::Display) -> DataError {
    DataError::Malformed(format!("{}: {e}", path.display()))
}

fn load_daily(path: &Path) -> Result<DailySeries, DataError> {
    let mut bars = Vec::new();
    for row in reader(path)?.deserialize::<DailyRow>() {
        let row = row.map_err(|e| malformed(path, e))?;
        let bar = DailyBar {
            date: row.date,
            open: row.open,
            close: row.close,
            high: row.high,
            low: row.low,
            volume: row.volume,
        };
        if let Some(defect) = bar.defect() {
            return Err(malformed(path, format!("{}: {defect}", bar.date)));
        }
        bars.push(bar);
    }
    bars.sort_by_key(|b| b.date);
    if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(malformed(path, format!("duplicate date {}", pair[0].date)));
    }
    Ok(bars)
}

fn load_ticks(path: &Path) -> Result<Vec<IntradayTick>, DataError> {
    let mut ticks = Vec::new();
    for row in reader(path)?.deserialize::<TickRow>() {
        let row = row.map_err(|e| malformed(path, e))?;
        let timestamp = NaiveDateTime::parse_from_str(&row.timestamp, TIMESTAMP_FORMAT)
            .map_err(|e| malformed(path, format!("timestamp '{}': {e}", row.timestamp)))?;
        ticks.push(IntradayTick {
            timestamp,
            price: row.price,
        });
    }
    Ok(ticks)
}

fn load_valuations(
    path: &Path,
    float_share_ratio: f64,
) -> Result<HashMap<String, ValuationSnapshot>, DataError> {
    let mut out = HashMap::new();
    for row in reader(path)?.deserialize::<ValuationRow>() {
        let row = row.map_err(|e| malformed(path, e))?;
        let snapshot = match row.float_shares {
            Some(float) => ValuationSnapshot::new(Some(float), row.total_market_value),
            None => ValuationSnapshot::from_market_value(
                row.total_market_value,
                row.last_price,
                float_share_ratio,
            ),
        };
        out.insert(row.symbol, snapshot);
    }
    Ok(out)
}

impl DataProvider for CsvDirectoryProvider {
    fn name(&self) -> &str {
        "csv_directory"
    }

    fn fetch_daily_series(&self, symbol: &str) -> Result<DailySeries, DataError> {
        load_daily(&self.symbol_file("daily", symbol)?)
    }

    fn fetch_valuation(&self, symbol: &str) -> Result<ValuationSnapshot, DataError> {
        Ok(self.valuations.get(symbol).copied().unwrap_or_default())
    }

    fn fetch_intraday(
        &self,
        symbol: &str,
        window: &SessionWindow,
    ) -> Result<Vec<IntradayTick>, DataError> {
        match self.symbol_file("intraday", symbol) {
            Ok(path) => Ok(latest_session_ticks(load_ticks(&path)?, window)),
            Err(DataError::SymbolNotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn fetch_benchmark_series(&self, index_symbol: &str) -> Result<DailySeries, DataError> {
        load_daily(&self.symbol_file("index", index_symbol)?)
    }
}
