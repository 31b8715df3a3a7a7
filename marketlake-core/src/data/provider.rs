//! Data provider traits and structured error types.
//!
//! `MarketDataProvider` abstracts over daily price sources (Yahoo Finance, fixtures)
//! and `MacroDataProvider` over dated macro series (FRED), so the pipeline can be
//! driven by mocks in tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MacroSeries;

/// Raw daily OHLCV bar from a data provider (before ingest/adjustment).
///
/// Missing prices are NaN; the ingest step drops bars whose close is NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub adj_close: f64,
    /// Cash dividend paid on this date (0 if none).
    pub dividends: f64,
    /// Split ratio effective on this date (0 if none).
    pub stock_splits: f64,
}

/// Structured error types for data operations.
///
/// These are displayable as-is in CLI status output.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("series '{series}' returned no observations")]
    EmptySeries { series: String },

    #[error("HTTP {status} for {target}")]
    Http { status: u16, target: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful price fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    Fixture,
}

/// Why an instrument contributed no rows.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("no data available")]
    NoData,

    #[error("data had no valid close prices")]
    NoValidClose,

    #[error(transparent)]
    Fetch(#[from] DataError),
}

/// Provider of full daily price histories.
///
/// Implementations return everything the source has for the symbol; the
/// feature pipeline decides what to keep.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the full available daily history for a symbol.
    fn fetch_history(&self, symbol: &str) -> Result<FetchResult, DataError>;
}

/// Provider of dated macro series.
pub trait MacroDataProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch a named series starting from `start` (inclusive).
    fn fetch_series(&self, series_id: &str, start: NaiveDate) -> Result<MacroSeries, DataError>;
}

/// Progress callback for multi-symbol fetches.
///
/// Skip reasons are not printed here; they are reported once, in aggregate,
/// by the caller after the batch.
pub trait FetchProgress: Send {
    /// Called when starting to fetch a symbol.
    fn on_start(&self, stage: &str, symbol: &str, index: usize, total: usize);

    /// Called when a symbol is done. `rows` is `None` when it was skipped.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, rows: Option<usize>);

    /// Called when the entire batch is done.
    fn on_batch_complete(&self, stage: &str, succeeded: usize, skipped: usize, total: usize);
}

/// Simple progress reporter that prints to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_start(&self, stage: &str, symbol: &str, index: usize, total: usize) {
        println!("[{stage} {}/{}] Fetching {symbol}...", index + 1, total);
    }

    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, _rows: Option<usize>) {}

    fn on_batch_complete(&self, stage: &str, succeeded: usize, skipped: usize, total: usize) {
        println!("{stage}: {succeeded}/{total} fetched, {skipped} skipped");
    }
}

/// Progress reporter that discards everything (tests, quiet runs).
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_start(&self, _stage: &str, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, _rows: Option<usize>) {}
    fn on_batch_complete(&self, _stage: &str, _succeeded: usize, _skipped: usize, _total: usize) {}
}
