//! marketlake runner: fetch orchestration over `marketlake-core`.
//!
//! This crate builds on `marketlake-core` to provide:
//! - Run configuration (TOML)
//! - Per-instrument fetch loops with typed outcomes and failure isolation
//! - Macro fetch and alignment
//! - Persist / load of the parquet snapshots

pub mod config;
pub mod outcome;
pub mod pipeline;
pub mod runner;

pub use config::{ConfigError, RunConfig};
pub use outcome::{Batch, IndexBatch, InstrumentOutcome, StockBatch};
pub use pipeline::{fetch_indices, fetch_macro, fetch_stocks, MacroFetchError};
pub use runner::{load, persist, run, PersistReport, Providers, RunPlan, RunReport};
