//! Index/benchmark growth rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::growth::{index_growth_column, GrowthSet, GROWTH_WINDOWS};

/// Growth ratios for one index on one calendar date. Price levels are discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexGrowthRow {
    pub index: String,
    pub date: NaiveDate,
    pub growth: GrowthSet,
}

impl IndexGrowthRow {
    /// Column names this row contributes to the wide index table.
    pub fn column_names(&self) -> Vec<String> {
        GROWTH_WINDOWS
            .iter()
            .map(|&w| index_growth_column(&self.index, w))
            .collect()
    }
}

/// Wide index table: one row per date, one column per (index, window).
///
/// Every column vector has the same length as `dates`. Missing values are
/// already normalized to zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexGrowthTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<(String, Vec<f64>)>,
}

impl IndexGrowthTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }
}
