//! Row ↔ polars `DataFrame` conversion for the three persisted tables.
//!
//! Column names follow the downstream notebooks: title-case price columns,
//! FRED series ids for macro levels, snake_case for derived features.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

use crate::domain::{
    growth_column, EnrichedPricePoint, IndexGrowthTable, MacroColumn, MacroRow, GROWTH_WINDOWS,
};

/// Days from 0001-01-01 to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub const DATE: &str = "Date";
pub const TICKER: &str = "Ticker";

fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

fn date_column(name: &str, dates: impl Iterator<Item = NaiveDate>) -> PolarsResult<Column> {
    let days: Vec<i32> = dates.map(epoch_days).collect();
    Column::new(name.into(), days).cast(&DataType::Date)
}

fn f64_column<T>(rows: &[T], name: &str, get: impl Fn(&T) -> f64) -> Column {
    let values: Vec<f64> = rows.iter().map(get).collect();
    Column::new(name.into(), values)
}

fn opt_column<T>(rows: &[T], name: &str, get: impl Fn(&T) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = rows.iter().map(get).collect();
    Column::new(name.into(), values)
}

fn i32_column<T>(rows: &[T], name: &str, get: impl Fn(&T) -> i32) -> Column {
    let values: Vec<i32> = rows.iter().map(get).collect();
    Column::new(name.into(), values)
}

/// Enriched price rows, one row per (ticker, date).
pub fn stocks_frame(rows: &[EnrichedPricePoint]) -> PolarsResult<DataFrame> {
    let tickers: Vec<&str> = rows.iter().map(|r| r.point.symbol.as_str()).collect();

    let mut columns = vec![
        date_column(DATE, rows.iter().map(|r| r.point.date))?,
        f64_column(rows, "Open", |r| r.point.open),
        f64_column(rows, "High", |r| r.point.high),
        f64_column(rows, "Low", |r| r.point.low),
        f64_column(rows, "Close", |r| r.point.close),
        f64_column(rows, "Volume", |r| r.point.volume),
        f64_column(rows, "Dividends", |r| r.point.dividends),
        f64_column(rows, "Stock Splits", |r| r.point.stock_splits),
        Column::new(TICKER.into(), tickers),
        i32_column(rows, "Year", |r| r.point.year),
        i32_column(rows, "Month", |r| r.point.month as i32),
        i32_column(rows, "Weekday", |r| r.point.weekday as i32),
    ];

    for (k, &window) in GROWTH_WINDOWS.iter().enumerate() {
        columns.push(opt_column(rows, &growth_column(window), |r| r.growth.0[k]));
    }

    columns.extend([
        opt_column(rows, "growth_future_30d", |r| r.growth_future_30d),
        opt_column(rows, "SMA10", |r| r.sma10),
        opt_column(rows, "SMA20", |r| r.sma20),
        i32_column(rows, "growing_moving_average", |r| {
            i32::from(r.growing_moving_average)
        }),
        f64_column(rows, "high_minus_low_relative", |r| r.high_minus_low_relative),
        opt_column(rows, "volatility", |r| r.volatility),
        i32_column(rows, "is_positive_growth_30d_future", |r| {
            i32::from(r.is_positive_growth_30d_future)
        }),
    ]);

    DataFrame::new(columns)
}

/// Wide index growth table: `Date` plus one column per (index, window).
pub fn indices_frame(table: &IndexGrowthTable) -> PolarsResult<DataFrame> {
    let mut columns = vec![date_column(DATE, table.dates.iter().copied())?];
    for (name, values) in &table.columns {
        columns.push(Column::new(name.as_str().into(), values.as_slice()));
    }
    DataFrame::new(columns)
}

/// Aligned macro rows, one per backbone date.
pub fn macro_frame(rows: &[MacroRow]) -> PolarsResult<DataFrame> {
    let value = |column: MacroColumn| opt_column(rows, column.name(), move |r| r.value(column));

    DataFrame::new(vec![
        date_column(DATE, rows.iter().map(|r| r.date))?,
        value(MacroColumn::Dgs1),
        value(MacroColumn::Dgs5),
        date_column("Quarter", rows.iter().map(|r| r.quarter))?,
        value(MacroColumn::GdpPotYoy),
        value(MacroColumn::GdpPotQoq),
        date_column("Month", rows.iter().map(|r| r.month))?,
        value(MacroColumn::FedFunds),
        value(MacroColumn::CpiCoreYoy),
        value(MacroColumn::CpiCoreMom),
        value(MacroColumn::Dgs10),
    ])
}
