//! Run orchestration: fetch all stages, then persist or load the snapshots.
//!
//! Stages run in a fixed order (stocks, indices, macro). Each stage's rows are
//! returned explicitly and combined only here; nothing accumulates in shared state.

use std::fmt;

use chrono::NaiveDate;
use marketlake_core::data::{
    indices_frame, macro_frame, stocks_frame, FetchProgress, LoadedTables, MacroDataProvider,
    MarketDataProvider, Pacer, SaveStatus, SnapshotError, SnapshotStore, Table, TableReport,
    Universe,
};
use marketlake_core::domain::{IndexGrowthTable, MacroRow};

use crate::outcome::{Batch, IndexBatch, StockBatch};
use crate::pipeline::{fetch_indices, fetch_macro, fetch_stocks, MacroFetchError};

/// Which stages a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub stocks: bool,
    pub indices: bool,
    pub macro_data: bool,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            stocks: true,
            indices: true,
            macro_data: true,
        }
    }
}

/// The external collaborators of a run.
#[derive(Clone, Copy)]
pub struct Providers<'a> {
    pub market: &'a dyn MarketDataProvider,
    pub macro_data: &'a dyn MacroDataProvider,
}

/// Everything one run produced.
#[derive(Debug)]
pub struct RunReport {
    pub stocks: StockBatch,
    pub indices: IndexBatch,
    pub index_table: IndexGrowthTable,
    pub macro_table: Vec<MacroRow>,
    /// Set when the macro stage ran and failed.
    pub macro_error: Option<MacroFetchError>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stage(f, "Stocks", &self.stocks, self.stocks.rows.len())?;
        write_stage(f, "Indices", &self.indices, self.index_table.len())?;
        match &self.macro_error {
            Some(e) => write!(f, "Macro: failed ({e})"),
            None => write!(f, "Macro: {} rows", self.macro_table.len()),
        }
    }
}

fn write_stage<R>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    batch: &Batch<R>,
    rows: usize,
) -> fmt::Result {
    if batch.is_empty() {
        return writeln!(f, "{name}: not fetched");
    }
    writeln!(
        f,
        "{name}: {}/{} fetched, {} skipped, {rows} rows",
        batch.fetched_count(),
        batch.outcomes.len(),
        batch.skipped_count()
    )?;
    for (symbol, reason) in batch.skipped() {
        writeln!(f, "  Skipped {symbol}: {reason}")?;
    }
    Ok(())
}

/// Fetch every stage in `plan`.
///
/// Per-instrument failures are recorded in the batches. A macro failure is
/// recorded in `macro_error`; it never discards the stock or index results.
pub fn run(
    universe: &Universe,
    macro_start: NaiveDate,
    providers: Providers<'_>,
    plan: RunPlan,
    pacer: &Pacer,
    progress: &dyn FetchProgress,
) -> RunReport {
    let stocks = if plan.stocks {
        fetch_stocks(providers.market, &universe.all_tickers(), pacer, progress)
    } else {
        StockBatch::default()
    };

    let indices = if plan.indices {
        fetch_indices(providers.market, &universe.index_symbols(), pacer, progress)
    } else {
        IndexBatch::default()
    };
    let index_table = indices.table();

    let (macro_table, macro_error) = if plan.macro_data {
        match fetch_macro(providers.macro_data, macro_start, pacer) {
            Ok(rows) => (rows, None),
            Err(e) => {
                tracing::error!(error = %e, "macro alignment failed");
                (Vec::new(), Some(e))
            }
        }
    } else {
        (Vec::new(), None)
    };

    tracing::info!(
        stocks = stocks.rows.len(),
        index_dates = index_table.len(),
        macro_rows = macro_table.len(),
        "run complete"
    );

    RunReport {
        stocks,
        indices,
        index_table,
        macro_table,
        macro_error,
    }
}

/// Status lines from a persist.
#[derive(Debug, Default)]
pub struct PersistReport {
    pub tables: Vec<TableReport>,
}

impl PersistReport {
    /// Tables whose write failed.
    pub fn failed(&self) -> Vec<Table> {
        self.tables
            .iter()
            .filter_map(|report| match report {
                TableReport::Save {
                    table,
                    status: SaveStatus::Failed(_),
                } => Some(*table),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for PersistReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.tables {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Write the three tables. Empty tables are reported and leave any prior
/// snapshot alone. A failed table is reported and the remaining tables are
/// still attempted.
pub fn persist(report: &RunReport, store: &SnapshotStore) -> PersistReport {
    let mut persisted = PersistReport::default();
    for table in Table::ALL {
        let status = match save_table(report, store, table) {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(table = table.file_name(), error = %e, "snapshot not saved");
                SaveStatus::Failed(e.to_string())
            }
        };
        persisted.tables.push(TableReport::Save { table, status });
    }
    persisted
}

fn save_table(
    report: &RunReport,
    store: &SnapshotStore,
    table: Table,
) -> Result<SaveStatus, SnapshotError> {
    let mut df = match table {
        Table::Stocks => stocks_frame(&report.stocks.rows)?,
        Table::Indices => indices_frame(&report.index_table)?,
        Table::Macro => macro_frame(&report.macro_table)?,
    };
    store.save(table, &mut df)
}

/// Read back whatever snapshots exist.
pub fn load(store: &SnapshotStore) -> LoadedTables {
    let loaded = store.load_all();
    for line in &loaded.reports {
        tracing::info!("{line}");
    }
    loaded
}
