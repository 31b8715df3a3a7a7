//! Price rows, one per (instrument, date).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::growth::GrowthSet;
use crate::data::provider::RawBar;

/// Daily OHLCV observation for a single instrument, with calendar fields.
///
/// Prices are already auto-adjusted for splits and dividends by the ingest step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub dividends: f64,
    pub stock_splits: f64,
    pub year: i32,
    pub month: u32,
    /// Day of week, Monday = 0.
    pub weekday: u32,
}

impl PricePoint {
    /// Build a price row from an ingested bar, deriving the calendar fields from its date.
    pub fn from_bar(symbol: &str, bar: &RawBar) -> Self {
        Self {
            symbol: symbol.to_string(),
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            dividends: bar.dividends,
            stock_splits: bar.stock_splits,
            year: bar.date.year(),
            month: bar.date.month(),
            weekday: bar.date.weekday().num_days_from_monday(),
        }
    }
}

/// A price row plus every derived feature column.
///
/// Computed once per fetch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPricePoint {
    pub point: PricePoint,
    pub growth: GrowthSet,
    pub growth_future_30d: Option<f64>,
    pub sma10: Option<f64>,
    pub sma20: Option<f64>,
    pub growing_moving_average: u8,
    pub high_minus_low_relative: f64,
    pub volatility: Option<f64>,
    pub is_positive_growth_30d_future: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_fields_from_date() {
        let bar = RawBar {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close: 1.5,
            volume: 100.0,
            adj_close: 1.5,
            dividends: 0.0,
            stock_splits: 0.0,
        };
        let point = PricePoint::from_bar("AAPL", &bar);
        assert_eq!(point.symbol, "AAPL");
        assert_eq!(point.year, 2024);
        assert_eq!(point.month, 3);
        // 2024-03-15 was a Friday
        assert_eq!(point.weekday, 4);
    }
}
