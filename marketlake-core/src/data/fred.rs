//! FRED macro series via the public `fredgraph.csv` download.
//!
//! The CSV endpoint needs no API key. Each response is a two-column CSV
//! (`observation_date,<SERIES>`); missing readings are written as `.`.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use std::time::Duration;

use super::provider::{DataError, MacroDataProvider};
use crate::domain::{MacroSeries, Observation};

const BASE_URL: &str = "https://fred.stlouisfed.org/graph/fredgraph.csv";

/// Real potential GDP, quarterly.
pub const SERIES_GDPPOT: &str = "GDPPOT";
/// Core CPI index, monthly.
pub const SERIES_CPILFESL: &str = "CPILFESL";
/// Effective federal funds rate, monthly.
pub const SERIES_FEDFUNDS: &str = "FEDFUNDS";
/// 1-year Treasury constant maturity, daily.
pub const SERIES_DGS1: &str = "DGS1";
/// 5-year Treasury constant maturity, daily.
pub const SERIES_DGS5: &str = "DGS5";
/// 10-year Treasury constant maturity, daily.
pub const SERIES_DGS10: &str = "DGS10";

pub struct FredProvider {
    client: Client,
}

impl FredProvider {
    pub fn new() -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl MacroDataProvider for FredProvider {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch_series(&self, series_id: &str, start: NaiveDate) -> Result<MacroSeries, DataError> {
        let cosd = start.to_string();
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[("id", series_id), ("cosd", cosd.as_str())])
            .send()
            .map_err(|e| DataError::NetworkUnreachable(format!("FRED request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(DataError::Http {
                status: resp.status().as_u16(),
                target: series_id.to_string(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| DataError::ResponseFormatChanged(format!("FRED body for {series_id}: {e}")))?;

        let series = parse_csv(series_id, &body)?;
        tracing::debug!(series = series_id, observations = series.len(), "fred series fetched");
        Ok(series)
    }
}

/// Parse a `fredgraph.csv` body into a series, keeping `.` readings as `None`.
pub fn parse_csv(series_id: &str, body: &str) -> Result<MacroSeries, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut observations = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            DataError::ResponseFormatChanged(format!("FRED CSV for {series_id}: {e}"))
        })?;

        let (Some(raw_date), Some(raw_value)) = (record.get(0), record.get(1)) else {
            return Err(DataError::ResponseFormatChanged(format!(
                "FRED CSV for {series_id}: expected two columns"
            )));
        };

        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
            DataError::ResponseFormatChanged(format!("invalid FRED date '{raw_date}': {e}"))
        })?;

        observations.push(Observation {
            date,
            value: parse_value(raw_value),
        });
    }

    if observations.is_empty() {
        return Err(DataError::EmptySeries {
            series: series_id.to_string(),
        });
    }

    Ok(MacroSeries::new(series_id, observations))
}

fn parse_value(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw == "." {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_and_missing_markers() {
        let body = "observation_date,DGS1\n2020-01-01,.\n2020-01-02,1.56\n2020-01-03,1.55\n";
        let series = parse_csv("DGS1", body).unwrap();

        assert_eq!(series.id, "DGS1");
        assert_eq!(series.len(), 3);
        assert_eq!(series.observations[0].value, None);
        assert_eq!(series.observations[1].value, Some(1.56));
        assert_eq!(
            series.observations[2].date,
            NaiveDate::from_ymd_opt(2020, 1, 3).unwrap()
        );
    }

    #[test]
    fn header_only_is_empty_series() {
        match parse_csv("GDPPOT", "observation_date,GDPPOT\n") {
            Err(DataError::EmptySeries { series }) => assert_eq!(series, "GDPPOT"),
            other => panic!("expected EmptySeries, got {other:?}"),
        }
    }

    #[test]
    fn bad_date_is_format_error() {
        let result = parse_csv("FEDFUNDS", "DATE,FEDFUNDS\nnot-a-date,1.0\n");
        assert!(matches!(result, Err(DataError::ResponseFormatChanged(_))));
    }
}
