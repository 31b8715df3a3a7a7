//! Macro Aligner. Broadcasts independently sampled macro series onto one daily index.
//!
//! The 1-year yield is the backbone: one output row per date it reports.
//! Other daily series join on the exact date; monthly and quarterly series
//! join on the calendar month/quarter start of each backbone date. Every join
//! is a left join that must keep the backbone one row per date.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::{MacroColumn, MacroRow, MacroSeries, MIN_YEAR};

/// Lags (in native periods) for the derived ratios.
pub const GDP_YOY_LAG: usize = 4;
pub const CPI_YOY_LAG: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum MacroError {
    /// A join key appeared twice on a side that must be unique.
    #[error("series '{series}' has more than one observation dated {date}")]
    DuplicateDate { series: String, date: NaiveDate },
}

/// The six fetched series the aligner consumes.
#[derive(Debug, Clone)]
pub struct MacroInputs {
    /// 1-year Treasury yield, daily. Backbone.
    pub dgs1: MacroSeries,
    /// 5-year Treasury yield, daily.
    pub dgs5: MacroSeries,
    /// 10-year Treasury yield, daily.
    pub dgs10: MacroSeries,
    /// Policy rate, monthly.
    pub fedfunds: MacroSeries,
    /// Potential GDP level, quarterly.
    pub gdppot: MacroSeries,
    /// Core CPI index level, monthly.
    pub cpilfesl: MacroSeries,
}

/// `value[t] / value[t - lag] - 1` over the series' own row order.
pub fn period_ratio(series: &MacroSeries, lag: usize) -> Vec<Option<f64>> {
    let values = series.values();
    (0..values.len())
        .map(|t| {
            let prev = t.checked_sub(lag).filter(|_| lag > 0)?;
            Some(values[t]? / values[prev]? - 1.0)
        })
        .collect()
}

/// Carry the last defined value forward over `None`s. Leading `None`s stay.
pub fn forward_fill(column: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    column
        .iter()
        .map(|value| {
            if value.is_some() {
                last = *value;
            }
            last
        })
        .collect()
}

/// First day of the calendar quarter containing `date`.
pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    let month = (date.month0() / 3) * 3 + 1;
    NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

/// First day of the calendar month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Date → row position, rejecting duplicate dates.
fn unique_dates(series: &MacroSeries) -> Result<HashMap<NaiveDate, usize>, MacroError> {
    let mut positions = HashMap::with_capacity(series.len());
    for (i, obs) in series.observations.iter().enumerate() {
        if positions.insert(obs.date, i).is_some() {
            return Err(MacroError::DuplicateDate {
                series: series.id.clone(),
                date: obs.date,
            });
        }
    }
    Ok(positions)
}

/// A right-hand join side: unique date key → one or more value columns.
struct JoinSide {
    positions: HashMap<NaiveDate, usize>,
    columns: Vec<Vec<Option<f64>>>,
}

impl JoinSide {
    fn new(series: &MacroSeries, columns: Vec<Vec<Option<f64>>>) -> Result<Self, MacroError> {
        Ok(Self {
            positions: unique_dates(series)?,
            columns,
        })
    }

    fn levels(series: &MacroSeries) -> Result<Self, MacroError> {
        Self::new(series, vec![series.values()])
    }

    fn lookup(&self, key: NaiveDate, column: usize) -> Option<f64> {
        self.positions
            .get(&key)
            .and_then(|&i| self.columns[column][i])
    }
}

/// Run the join chain and forward-fill. Rows keep their `None`s where no
/// reading exists yet; see [`finalize`] for the persisted form.
pub fn align(inputs: &MacroInputs) -> Result<Vec<MacroRow>, MacroError> {
    // Backbone must be unique for the one-to-one joins.
    unique_dates(&inputs.dgs1)?;

    let dgs5 = JoinSide::levels(&inputs.dgs5)?;
    let gdp = JoinSide::new(
        &inputs.gdppot,
        vec![
            period_ratio(&inputs.gdppot, GDP_YOY_LAG),
            period_ratio(&inputs.gdppot, 1),
        ],
    )?;
    let fedfunds = JoinSide::levels(&inputs.fedfunds)?;
    let cpi = JoinSide::new(
        &inputs.cpilfesl,
        vec![
            period_ratio(&inputs.cpilfesl, CPI_YOY_LAG),
            period_ratio(&inputs.cpilfesl, 1),
        ],
    )?;
    let dgs10 = JoinSide::levels(&inputs.dgs10)?;

    let mut backbone = inputs.dgs1.observations.clone();
    backbone.sort_by_key(|o| o.date);

    let mut rows: Vec<MacroRow> = backbone
        .iter()
        .map(|obs| {
            let quarter = quarter_start(obs.date);
            let month = month_start(obs.date);
            MacroRow {
                date: obs.date,
                quarter,
                month,
                dgs1: obs.value,
                dgs5: dgs5.lookup(obs.date, 0),
                gdppot_us_yoy: gdp.lookup(quarter, 0),
                gdppot_us_qoq: gdp.lookup(quarter, 1),
                fedfunds: fedfunds.lookup(month, 0),
                cpi_core_yoy: cpi.lookup(month, 0),
                cpi_core_mom: cpi.lookup(month, 1),
                dgs10: dgs10.lookup(obs.date, 0),
            }
        })
        .collect();

    for column in MacroColumn::FORWARD_FILLED {
        let values: Vec<Option<f64>> = rows.iter().map(|row| row.value(column)).collect();
        for (row, filled) in rows.iter_mut().zip(forward_fill(&values)) {
            *row.value_mut(column) = filled;
        }
    }

    Ok(rows)
}

/// Drop rows before `MIN_YEAR` and zero-fill every remaining gap.
pub fn finalize(rows: Vec<MacroRow>) -> Vec<MacroRow> {
    let cutoff = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
    rows.into_iter()
        .filter(|row| row.date >= cutoff)
        .map(|mut row| {
            for column in MacroColumn::ALL {
                let cell = row.value_mut(column);
                if cell.is_none() {
                    *cell = Some(0.0);
                }
            }
            row
        })
        .collect()
}

/// Align, forward-fill and normalize: the persisted macro table.
pub fn build_macro_table(inputs: &MacroInputs) -> Result<Vec<MacroRow>, MacroError> {
    let rows = finalize(align(inputs)?);
    tracing::info!(rows = rows.len(), "macro table aligned");
    Ok(rows)
}
