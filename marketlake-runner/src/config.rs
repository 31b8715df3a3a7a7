//! Run configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file) is a valid config.

use chrono::{Datelike, NaiveDate};
use marketlake_core::data::{Pacer, Universe};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid universe file {path}: {reason}")]
    Universe { path: PathBuf, reason: String },
}

/// Settings for one fetch run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Directory holding the parquet snapshots.
    pub output_dir: PathBuf,
    /// Delay between consecutive provider calls, in milliseconds.
    pub pacing_ms: u64,
    /// How far back price histories are requested.
    pub history_years: u32,
    /// First date requested from FRED.
    pub macro_start: NaiveDate,
    /// Universe TOML. `None` uses the built-in global universe.
    pub universe_file: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            pacing_ms: 1_000,
            history_years: 70,
            macro_start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default(),
            universe_file: None,
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn pacer(&self) -> Pacer {
        Pacer::from_millis(self.pacing_ms)
    }

    /// Same calendar day `history_years` before `today` (Feb 29 falls back to Feb 28).
    pub fn history_start(&self, today: NaiveDate) -> NaiveDate {
        let year = today.year() - self.history_years as i32;
        NaiveDate::from_ymd_opt(year, today.month(), today.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, today.month(), 28))
            .unwrap_or(today)
    }

    /// The configured universe, or the built-in one.
    pub fn universe(&self) -> Result<Universe, ConfigError> {
        match &self.universe_file {
            Some(path) => Universe::from_file(path).map_err(|reason| ConfigError::Universe {
                path: path.clone(),
                reason,
            }),
            None => Ok(Universe::default_global()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.pacer().delay(), Duration::from_secs(1));
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = RunConfig::from_toml(
            r#"
output_dir = "/tmp/lake"
pacing_ms = 0
macro_start = "2005-01-01"
"#,
        )
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/lake"));
        assert_eq!(config.pacing_ms, 0);
        assert_eq!(config.history_years, 70);
        assert_eq!(
            config.macro_start,
            NaiveDate::from_ymd_opt(2005, 1, 1).unwrap()
        );
    }

    #[test]
    fn unknown_value_type_is_rejected() {
        assert!(matches!(
            RunConfig::from_toml("pacing_ms = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn history_start_goes_back_whole_years() {
        let config = RunConfig::default();
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(
            config.history_start(today),
            NaiveDate::from_ymd_opt(1954, 6, 15).unwrap()
        );

        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let config = RunConfig {
            history_years: 1,
            ..RunConfig::default()
        };
        assert_eq!(
            config.history_start(leap),
            NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()
        );
    }

    #[test]
    fn missing_universe_file_is_an_error() {
        let config = RunConfig {
            universe_file: Some(PathBuf::from("/nonexistent/universe.toml")),
            ..RunConfig::default()
        };
        assert!(matches!(
            config.universe(),
            Err(ConfigError::Universe { .. })
        ));
    }
}
