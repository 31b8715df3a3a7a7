//! Macro series as fetched, and the aligned daily macro row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated reading of a macro series. `None` marks a reported-but-missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A macro series at its native frequency (daily, monthly or quarterly).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSeries {
    pub id: String,
    pub observations: Vec<Observation>,
}

impl MacroSeries {
    pub fn new(id: impl Into<String>, observations: Vec<Observation>) -> Self {
        Self {
            id: id.into(),
            observations,
        }
    }

    /// Convenience constructor from `(date, value)` pairs.
    pub fn from_pairs(id: impl Into<String>, pairs: &[(NaiveDate, Option<f64>)]) -> Self {
        Self::new(
            id,
            pairs
                .iter()
                .map(|&(date, value)| Observation { date, value })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.observations.iter().map(|o| o.value).collect()
    }
}

/// Value columns of a macro row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroColumn {
    Dgs1,
    Dgs5,
    GdpPotYoy,
    GdpPotQoq,
    FedFunds,
    CpiCoreYoy,
    CpiCoreMom,
    Dgs10,
}

impl MacroColumn {
    /// Persisted column order (after `Date`, `Quarter` and `Month`).
    pub const ALL: [MacroColumn; 8] = [
        Self::Dgs1,
        Self::Dgs5,
        Self::GdpPotYoy,
        Self::GdpPotQoq,
        Self::FedFunds,
        Self::CpiCoreYoy,
        Self::CpiCoreMom,
        Self::Dgs10,
    ];

    /// Columns carried forward to cover days without a fresh reading.
    /// GDP ratios are deliberately absent.
    pub const FORWARD_FILLED: [MacroColumn; 6] = [
        Self::CpiCoreYoy,
        Self::CpiCoreMom,
        Self::FedFunds,
        Self::Dgs1,
        Self::Dgs5,
        Self::Dgs10,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Dgs1 => "DGS1",
            Self::Dgs5 => "DGS5",
            Self::GdpPotYoy => "gdppot_us_yoy",
            Self::GdpPotQoq => "gdppot_us_qoq",
            Self::FedFunds => "FEDFUNDS",
            Self::CpiCoreYoy => "cpi_core_yoy",
            Self::CpiCoreMom => "cpi_core_mom",
            Self::Dgs10 => "DGS10",
        }
    }
}

/// One calendar day of aligned macro data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRow {
    pub date: NaiveDate,
    /// Calendar quarter start of `date`.
    pub quarter: NaiveDate,
    /// Calendar month start of `date`.
    pub month: NaiveDate,
    pub dgs1: Option<f64>,
    pub dgs5: Option<f64>,
    pub gdppot_us_yoy: Option<f64>,
    pub gdppot_us_qoq: Option<f64>,
    pub fedfunds: Option<f64>,
    pub cpi_core_yoy: Option<f64>,
    pub cpi_core_mom: Option<f64>,
    pub dgs10: Option<f64>,
}

impl MacroRow {
    pub fn value(&self, column: MacroColumn) -> Option<f64> {
        match column {
            MacroColumn::Dgs1 => self.dgs1,
            MacroColumn::Dgs5 => self.dgs5,
            MacroColumn::GdpPotYoy => self.gdppot_us_yoy,
            MacroColumn::GdpPotQoq => self.gdppot_us_qoq,
            MacroColumn::FedFunds => self.fedfunds,
            MacroColumn::CpiCoreYoy => self.cpi_core_yoy,
            MacroColumn::CpiCoreMom => self.cpi_core_mom,
            MacroColumn::Dgs10 => self.dgs10,
        }
    }

    pub fn value_mut(&mut self, column: MacroColumn) -> &mut Option<f64> {
        match column {
            MacroColumn::Dgs1 => &mut self.dgs1,
            MacroColumn::Dgs5 => &mut self.dgs5,
            MacroColumn::GdpPotYoy => &mut self.gdppot_us_yoy,
            MacroColumn::GdpPotQoq => &mut self.gdppot_us_qoq,
            MacroColumn::FedFunds => &mut self.fedfunds,
            MacroColumn::CpiCoreYoy => &mut self.cpi_core_yoy,
            MacroColumn::CpiCoreMom => &mut self.cpi_core_mom,
            MacroColumn::Dgs10 => &mut self.dgs10,
        }
    }
}
