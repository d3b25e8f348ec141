//! ScreenLab CLI — end-of-day A-share screening.
//!
//! Commands:
//! - `screen` — run the filter chain over a universe read from a CSV data directory
//! - `config` — print the default configuration as TOML

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use screenlab_core::data::{CsvDirectoryProvider, Universe};
use screenlab_runner::{render_summary, save_json, ScreenConfig, ScreenReport, ScreeningRun};

#[derive(Parser)]
#[command(name = "screenlab", about = "ScreenLab CLI — end-of-day momentum screener")]
struct Cli {
    /// Log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    /// Base log level; RUST_LOG overrides it.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Screen symbols and print the selection with a rejection breakdown.
    Screen {
        /// Symbols to screen, in addition to any from --universe.
        symbols: Vec<String>,

        /// Directory with daily/, index/, intraday/ and valuation.csv.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// TOML configuration. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Universe TOML file with a [sectors] table.
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Restrict the universe to one sector.
        #[arg(long, requires = "universe")]
        sector: Option<String>,

        /// Evaluate symbols in parallel (overrides the config file).
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Write the full report as JSON to this path.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Print the default configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Screen {
            symbols,
            data_dir,
            config,
            universe,
            sector,
            parallel,
            json,
        } => run_screen(ScreenArgs {
            symbols,
            data_dir,
            config,
            universe,
            sector,
            parallel,
            json,
        }),
        Commands::Config => {
            print!("{}", ScreenConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only the summary.
fn init_logging(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(std::io::stderr);
            let _ = registry.with(layer).try_init();
        }
        LogFormat::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            let _ = registry.with(layer).try_init();
        }
    }
}

struct ScreenArgs {
    symbols: Vec<String>,
    data_dir: PathBuf,
    config: Option<PathBuf>,
    universe: Option<PathBuf>,
    sector: Option<String>,
    parallel: bool,
    json: Option<PathBuf>,
}

fn run_screen(args: ScreenArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ScreenConfig::from_file(path)?,
        None => ScreenConfig::default(),
    };
    if args.parallel {
        config.execution.parallel = true;
    }

    let symbols = collect_symbols(&args)?;
    if symbols.is_empty() {
        warn!("no symbols to screen: pass tickers or --universe");
    }
    info!(
        symbols = symbols.len(),
        fingerprint = %config.fingerprint(),
        "configuration loaded"
    );

    let provider = CsvDirectoryProvider::open_with_float_ratio(
        &args.data_dir,
        config.thresholds.float_value_ratio,
    )
    .with_context(|| format!("failed to open data directory {}", args.data_dir.display()))?;

    let refs: Vec<&str> = symbols.iter().map(String::as_str).collect();
    let result = ScreeningRun::new(&provider, &config)?.run(&refs);

    print!("{}", render_summary(&result));

    if let Some(path) = &args.json {
        save_json(&ScreenReport::new(&config, result), path)?;
        println!();
        println!("Report saved to: {}", path.display());
    }
    Ok(())
}

/// Universe tickers first, then positional symbols not already present.
fn collect_symbols(args: &ScreenArgs) -> Result<Vec<String>> {
    let mut symbols: Vec<String> = match &args.universe {
        Some(path) => universe_tickers(path, args.sector.as_deref())?,
        None => Vec::new(),
    };
    for s in &args.symbols {
        if !symbols.contains(s) {
            symbols.push(s.clone());
        }
    }
    Ok(symbols)
}

fn universe_tickers(path: &Path, sector: Option<&str>) -> Result<Vec<String>> {
    let universe = Universe::from_file(path)?;
    match sector {
        Some(name) => match universe.sector_tickers(name) {
            Some(tickers) => Ok(tickers.to_vec()),
            None => bail!(
                "unknown sector '{name}'. Available: {}",
                universe.sectors.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        },
        None => Ok(universe.all_tickers().into_iter().map(String::from).collect()),
    }
}
