//! marketlake CLI: fetch, load and universe commands.
//!
//! Commands:
//! - `fetch`: download prices and macro series, derive features, write parquet snapshots
//! - `load`: read the snapshots back and report what is there
//! - `universe`: print or write the built-in ticker universe as TOML

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use marketlake_core::data::{
    FredProvider, SnapshotStore, StdoutProgress, Table, Universe, YahooProvider,
};
use marketlake_runner::{load, persist, run, Providers, RunConfig, RunPlan};

#[derive(Parser)]
#[command(
    name = "marketlake",
    about = "marketlake: equity, index and macro time series to parquet"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all instruments and macro series, then persist the three snapshots.
    Fetch {
        /// Path to a TOML run config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Snapshot directory (overrides the config).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Delay between provider calls in milliseconds (overrides the config).
        #[arg(long)]
        pacing_ms: Option<u64>,

        /// Do not fetch stocks.
        #[arg(long, default_value_t = false)]
        skip_stocks: bool,

        /// Do not fetch indices.
        #[arg(long, default_value_t = false)]
        skip_indices: bool,

        /// Do not fetch macro series.
        #[arg(long, default_value_t = false)]
        skip_macro: bool,
    },
    /// Load the persisted snapshots and print per-table status.
    Load {
        /// Snapshot directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        output_dir: PathBuf,
    },
    /// Print the built-in universe as TOML, or write it to a file.
    Universe {
        /// Write to this file instead of stdout.
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            config,
            output_dir,
            pacing_ms,
            skip_stocks,
            skip_indices,
            skip_macro,
        } => {
            let plan = RunPlan {
                stocks: !skip_stocks,
                indices: !skip_indices,
                macro_data: !skip_macro,
            };
            run_fetch(config.as_deref(), output_dir, pacing_ms, plan)
        }
        Commands::Load { output_dir } => run_load(&output_dir),
        Commands::Universe { write } => run_universe(write.as_deref()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn run_fetch(
    config_path: Option<&Path>,
    output_dir: Option<PathBuf>,
    pacing_ms: Option<u64>,
    plan: RunPlan,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(ms) = pacing_ms {
        config.pacing_ms = ms;
    }

    let universe = config.universe()?;
    let today = chrono::Local::now().date_naive();
    let yahoo = YahooProvider::new(config.history_start(today))?;
    let fred = FredProvider::new()?;
    let providers = Providers {
        market: &yahoo,
        macro_data: &fred,
    };

    println!(
        "Fetching {} tickers, {} indices into {}",
        universe.ticker_count(),
        universe.indices.len(),
        config.output_dir.display()
    );

    let report = run(
        &universe,
        config.macro_start,
        providers,
        plan,
        &config.pacer(),
        &StdoutProgress,
    );
    println!("{report}");

    let store = SnapshotStore::new(&config.output_dir);
    let persisted = persist(&report, &store);
    print!("{persisted}");

    let failed = persisted.failed();
    if !failed.is_empty() {
        return Err(anyhow!(
            "{} of {} tables could not be saved",
            failed.len(),
            Table::ALL.len()
        ));
    }
    Ok(())
}

fn run_load(output_dir: &Path) -> Result<()> {
    let store = SnapshotStore::new(output_dir);
    let loaded = load(&store);

    for line in &loaded.reports {
        println!("{line}");
    }
    for table in Table::ALL {
        if let Some(df) = loaded.get(table) {
            println!(
                "  {}: {} rows x {} columns",
                table.file_name(),
                df.height(),
                df.width()
            );
        }
    }

    Ok(())
}

fn run_universe(write: Option<&Path>) -> Result<()> {
    let universe = Universe::default_global();
    let toml = universe.to_toml().map_err(|e| anyhow!(e))?;

    match write {
        Some(path) => {
            std::fs::write(path, toml)?;
            println!(
                "Wrote {} tickers in {} regions and {} indices to {}",
                universe.ticker_count(),
                universe.region_names().len(),
                universe.indices.len(),
                path.display()
            );
        }
        None => print!("{toml}"),
    }

    Ok(())
}
