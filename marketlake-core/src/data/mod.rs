//! External data: providers, ingest, universe, and the parquet snapshot store.

pub mod fred;
pub mod frames;
pub mod ingest;
pub mod pacer;
pub mod provider;
pub mod snapshot;
pub mod universe;
pub mod yahoo;

pub use fred::FredProvider;
pub use frames::{indices_frame, macro_frame, stocks_frame};
pub use ingest::{dedupe_dates, ingest};
pub use pacer::Pacer;
pub use provider::{
    DataError, DataSource, FetchProgress, FetchResult, MacroDataProvider, MarketDataProvider,
    RawBar, SilentProgress, SkipReason, StdoutProgress,
};
pub use snapshot::{
    LoadStatus, LoadedTables, SaveStatus, SnapshotError, SnapshotStore, Table, TableReport,
};
pub use universe::Universe;
pub use yahoo::YahooProvider;
