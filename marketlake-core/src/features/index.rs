//! Index Growth Projector and the wide index table.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::rolling::growth_ratios;
use crate::data::ingest::ingest;
use crate::data::provider::{RawBar, SkipReason};
use crate::domain::{
    index_growth_column, GrowthSet, IndexGrowthRow, IndexGrowthTable, GROWTH_WINDOWS, MIN_YEAR,
};

/// Growth-only projection of an index series.
///
/// Ratios are computed over every ingested observation; afterwards rows sharing a
/// calendar date collapse to the first one encountered.
pub fn project_index(index: &str, bars: Vec<RawBar>) -> Result<Vec<IndexGrowthRow>, SkipReason> {
    let bars = ingest(bars)?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let growth: Vec<Vec<Option<f64>>> = GROWTH_WINDOWS
        .iter()
        .map(|&w| growth_ratios(&closes, w))
        .collect();

    let mut rows: Vec<IndexGrowthRow> = Vec::with_capacity(bars.len());
    for (t, bar) in bars.iter().enumerate() {
        if rows.last().is_some_and(|r| r.date == bar.date) {
            continue;
        }
        let mut set = GrowthSet::default();
        for (slot, column) in set.0.iter_mut().zip(&growth) {
            *slot = column[t];
        }
        rows.push(IndexGrowthRow {
            index: index.to_string(),
            date: bar.date,
            growth: set,
        });
    }

    Ok(rows)
}

/// Merge per-index rows into one wide table keyed by date.
///
/// Columns appear in the order indices are first seen. For each (date, column)
/// the first defined value wins. Dates before `MIN_YEAR` are dropped and any
/// remaining gap is zero.
pub fn merge_index_rows(rows: &[IndexGrowthRow]) -> IndexGrowthTable {
    let mut indices: Vec<&str> = Vec::new();
    for row in rows {
        if !indices.contains(&row.index.as_str()) {
            indices.push(&row.index);
        }
    }

    let width = indices.len() * GROWTH_WINDOWS.len();
    let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

    for row in rows {
        let Some(offset) = indices.iter().position(|i| *i == row.index) else {
            continue;
        };
        let cells = by_date
            .entry(row.date)
            .or_insert_with(|| vec![None; width]);
        for (k, value) in row.growth.0.iter().enumerate() {
            let cell = &mut cells[offset * GROWTH_WINDOWS.len() + k];
            if cell.is_none() {
                *cell = *value;
            }
        }
    }

    let cutoff = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
    let kept: Vec<(NaiveDate, Vec<Option<f64>>)> = by_date
        .into_iter()
        .filter(|(date, _)| *date >= cutoff)
        .collect();

    let n = kept.len();
    let mut columns: Vec<(String, Vec<f64>)> = indices
        .iter()
        .flat_map(|index| {
            GROWTH_WINDOWS
                .iter()
                .map(move |&w| (index_growth_column(index, w), Vec::with_capacity(n)))
        })
        .collect();

    for (_, cells) in &kept {
        for (column, cell) in columns.iter_mut().zip(cells) {
            column.1.push(cell.unwrap_or(0.0));
        }
    }

    IndexGrowthTable {
        dates: kept.into_iter().map(|(date, _)| date).collect(),
        columns,
    }
}
