//! Domain rows for marketlake

pub mod growth;
pub mod index;
pub mod macro_data;
pub mod price;

pub use growth::{
    growth_column, index_growth_column, GrowthSet, FUTURE_HORIZON, GROWTH_WINDOWS,
};
pub use index::{IndexGrowthRow, IndexGrowthTable};
pub use macro_data::{MacroColumn, MacroRow, MacroSeries, Observation};
pub use price::{EnrichedPricePoint, PricePoint};

/// First calendar year kept in every persisted table.
pub const MIN_YEAR: i32 = 2000;
