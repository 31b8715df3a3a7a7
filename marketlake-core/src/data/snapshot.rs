//! Parquet snapshot store for the three persisted tables.
//!
//! Layout: `{data_dir}/{stocks,indices,macro}_df.parquet`
//!
//! A save removes the previous file before writing the new one (via `.tmp` +
//! rename). A crash between those steps leaves no file, which a later load
//! reports as `Missing`, never as corrupt data.

use polars::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot I/O errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parquet error on {path}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("dataframe error: {0}")]
    Frame(#[from] PolarsError),
}

/// One of the three persisted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Stocks,
    Indices,
    Macro,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Stocks, Table::Indices, Table::Macro];

    pub fn file_name(self) -> &'static str {
        match self {
            Table::Stocks => "stocks_df.parquet",
            Table::Indices => "indices_df.parquet",
            Table::Macro => "macro_df.parquet",
        }
    }

    /// Noun used in status messages.
    pub fn label(self) -> &'static str {
        match self {
            Table::Stocks => "ticker",
            Table::Indices => "index",
            Table::Macro => "macro",
        }
    }

    /// Noun for the record count after a save.
    fn record_noun(self) -> &'static str {
        match self {
            Table::Stocks => "stock",
            other => other.label(),
        }
    }
}

/// Outcome of saving one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved { rows: usize },
    /// The table was empty; any previous snapshot is left untouched.
    NothingToSave,
    Failed(String),
}

/// Outcome of loading one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded { rows: usize },
    Missing,
    Unreadable(String),
}

/// Status line for one table, rendered in console style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableReport {
    Save { table: Table, status: SaveStatus },
    Load { table: Table, status: LoadStatus },
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableReport::Save { table, status } => match status {
                SaveStatus::Saved { rows } => {
                    write!(f, "Saved {rows} {} records", table.record_noun())
                }
                SaveStatus::NothingToSave => write!(f, "No {} data to save", table.label()),
                SaveStatus::Failed(reason) => {
                    write!(f, "Failed to save {} data: {reason}", table.label())
                }
            },
            TableReport::Load { table, status } => {
                let label = capitalize(table.label());
                match status {
                    LoadStatus::Loaded { rows } => {
                        write!(f, "Loaded {rows} {} records", table.label())
                    }
                    LoadStatus::Missing => write!(f, "{label} file not found."),
                    LoadStatus::Unreadable(reason) => {
                        write!(f, "{label} file could not be read: {reason}")
                    }
                }
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Tables read back from disk. Absent or unreadable tables are `None`.
#[derive(Debug, Default)]
pub struct LoadedTables {
    pub stocks: Option<DataFrame>,
    pub indices: Option<DataFrame>,
    pub macro_table: Option<DataFrame>,
    pub reports: Vec<TableReport>,
}

impl LoadedTables {
    pub fn get(&self, table: Table) -> Option<&DataFrame> {
        match table {
            Table::Stocks => self.stocks.as_ref(),
            Table::Indices => self.indices.as_ref(),
            Table::Macro => self.macro_table.as_ref(),
        }
    }

    fn slot(&mut self, table: Table) -> &mut Option<DataFrame> {
        match table {
            Table::Stocks => &mut self.stocks,
            Table::Indices => &mut self.indices,
            Table::Macro => &mut self.macro_table,
        }
    }
}

/// Directory holding the parquet snapshots.
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path(&self, table: Table) -> PathBuf {
        self.data_dir.join(table.file_name())
    }

    /// Replace the snapshot for `table` with `df`.
    pub fn save(&self, table: Table, df: &mut DataFrame) -> Result<SaveStatus, SnapshotError> {
        if df.height() == 0 {
            return Ok(SaveStatus::NothingToSave);
        }

        fs::create_dir_all(&self.data_dir).map_err(|source| SnapshotError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self.path(table);
        if path.exists() {
            fs::remove_file(&path).map_err(|source| SnapshotError::Io {
                path: path.clone(),
                source,
            })?;
        }

        let tmp_path = path.with_extension("parquet.tmp");
        write_parquet(df, &tmp_path)?;

        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            SnapshotError::Io {
                path: path.clone(),
                source,
            }
        })?;

        tracing::info!(table = table.file_name(), rows = df.height(), "snapshot saved");
        Ok(SaveStatus::Saved { rows: df.height() })
    }

    /// Read one snapshot. `Ok(None)` when the file does not exist.
    pub fn load(&self, table: Table) -> Result<Option<DataFrame>, SnapshotError> {
        let path = self.path(table);
        if !path.exists() {
            return Ok(None);
        }
        read_parquet(&path).map(Some)
    }

    /// Read every snapshot that exists. Never fails as a whole.
    pub fn load_all(&self) -> LoadedTables {
        let mut loaded = LoadedTables::default();

        for table in Table::ALL {
            let status = match self.load(table) {
                Ok(Some(df)) => {
                    let rows = df.height();
                    *loaded.slot(table) = Some(df);
                    LoadStatus::Loaded { rows }
                }
                Ok(None) => LoadStatus::Missing,
                Err(e) => {
                    tracing::warn!(table = table.file_name(), error = %e, "snapshot unreadable");
                    LoadStatus::Unreadable(e.to_string())
                }
            };
            loaded.reports.push(TableReport::Load { table, status });
        }

        loaded
    }
}

// ── Parquet I/O helpers ─────────────────────────────────────────────

fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<(), SnapshotError> {
    let file = fs::File::create(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetWriter::new(file)
        .with_compression(ParquetCompression::Brotli(None))
        .finish(df)
        .map_err(|source| SnapshotError::Parquet {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(())
}

fn read_parquet(path: &Path) -> Result<DataFrame, SnapshotError> {
    let file = fs::File::open(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|source| SnapshotError::Parquet {
            path: path.to_path_buf(),
            source,
        })
}
