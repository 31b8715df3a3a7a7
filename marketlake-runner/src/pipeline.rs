//! Per-stage fetch loops.
//!
//! Stocks and indices are fetched one symbol at a time. A failure on one
//! symbol becomes a `Skipped` outcome and the loop moves on. Macro series are
//! all-or-nothing: the aligner needs all six.

use chrono::NaiveDate;
use marketlake_core::data::fred::{
    SERIES_CPILFESL, SERIES_DGS1, SERIES_DGS10, SERIES_DGS5, SERIES_FEDFUNDS, SERIES_GDPPOT,
};
use marketlake_core::data::{
    DataError, FetchProgress, MacroDataProvider, MarketDataProvider, Pacer, RawBar, SkipReason,
};
use marketlake_core::domain::{MacroRow, MacroSeries};
use marketlake_core::features::{enrich_instrument, project_index};
use marketlake_core::macro_align::{build_macro_table, MacroError, MacroInputs};
use thiserror::Error;

use crate::outcome::{Batch, IndexBatch, InstrumentOutcome, StockBatch};

pub const STAGE_STOCKS: &str = "stocks";
pub const STAGE_INDICES: &str = "indices";

/// Why the macro table could not be built.
#[derive(Debug, Error)]
pub enum MacroFetchError {
    #[error("failed to fetch {series}: {source}")]
    Fetch {
        series: String,
        #[source]
        source: DataError,
    },

    #[error(transparent)]
    Align(#[from] MacroError),
}

/// Fetch and enrich every stock in `symbols`.
pub fn fetch_stocks(
    provider: &dyn MarketDataProvider,
    symbols: &[&str],
    pacer: &Pacer,
    progress: &dyn FetchProgress,
) -> StockBatch {
    fetch_each(STAGE_STOCKS, provider, symbols, pacer, progress, enrich_instrument)
}

/// Fetch every index in `indices` and project it to growth rows.
pub fn fetch_indices(
    provider: &dyn MarketDataProvider,
    indices: &[&str],
    pacer: &Pacer,
    progress: &dyn FetchProgress,
) -> IndexBatch {
    fetch_each(STAGE_INDICES, provider, indices, pacer, progress, project_index)
}

fn fetch_each<R>(
    stage: &str,
    provider: &dyn MarketDataProvider,
    symbols: &[&str],
    pacer: &Pacer,
    progress: &dyn FetchProgress,
    transform: impl Fn(&str, Vec<RawBar>) -> Result<Vec<R>, SkipReason>,
) -> Batch<R> {
    let total = symbols.len();
    let mut batch = Batch::default();

    for (i, &symbol) in symbols.iter().enumerate() {
        pacer.before_call();
        progress.on_start(stage, symbol, i, total);

        let result = provider
            .fetch_history(symbol)
            .map_err(SkipReason::from)
            .and_then(|fetched| transform(symbol, fetched.bars));

        match result {
            Ok(rows) => {
                let count = rows.len();
                tracing::debug!(stage, symbol, rows = count, "fetched");
                progress.on_complete(symbol, i, total, Some(count));
                batch.rows.extend(rows);
                batch.outcomes.push(InstrumentOutcome::Fetched {
                    symbol: symbol.to_string(),
                    rows: count,
                });
            }
            Err(reason) => {
                tracing::warn!(stage, symbol, %reason, "skipped");
                progress.on_complete(symbol, i, total, None);
                batch.outcomes.push(InstrumentOutcome::Skipped {
                    symbol: symbol.to_string(),
                    reason,
                });
            }
        }
    }

    progress.on_batch_complete(stage, batch.fetched_count(), batch.skipped_count(), total);
    batch
}

/// Fetch the six FRED series from `start` and build the aligned macro table.
pub fn fetch_macro(
    provider: &dyn MacroDataProvider,
    start: NaiveDate,
    pacer: &Pacer,
) -> Result<Vec<MacroRow>, MacroFetchError> {
    let fetch = |series: &str| -> Result<MacroSeries, MacroFetchError> {
        pacer.before_call();
        let fetched = provider
            .fetch_series(series, start)
            .map_err(|source| MacroFetchError::Fetch {
                series: series.to_string(),
                source,
            })?;
        tracing::debug!(series, observations = fetched.len(), "macro series fetched");
        Ok(fetched)
    };

    let gdppot = fetch(SERIES_GDPPOT)?;
    let cpilfesl = fetch(SERIES_CPILFESL)?;
    let fedfunds = fetch(SERIES_FEDFUNDS)?;
    let dgs1 = fetch(SERIES_DGS1)?;
    let dgs5 = fetch(SERIES_DGS5)?;
    let dgs10 = fetch(SERIES_DGS10)?;

    let inputs = MacroInputs {
        dgs1,
        dgs5,
        dgs10,
        fedfunds,
        gdppot,
        cpilfesl,
    };
    Ok(build_macro_table(&inputs)?)
}
