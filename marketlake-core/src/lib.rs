//! marketlake core: domain rows, feature derivation, macro alignment, data access.
//!
//! - Domain rows (price points, enriched rows, index growth rows, macro rows)
//! - Feature Enricher and Index Growth Projector over daily price histories
//! - Macro Aligner joining FRED series of mixed frequency onto a daily backbone
//! - Providers (Yahoo chart API, FRED CSV), ticker universe, parquet snapshots

pub mod data;
pub mod domain;
pub mod features;
pub mod macro_align;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: rows and providers can move across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::EnrichedPricePoint>();
        require_sync::<domain::EnrichedPricePoint>();
        require_send::<domain::IndexGrowthRow>();
        require_sync::<domain::IndexGrowthRow>();
        require_send::<domain::MacroRow>();
        require_sync::<domain::MacroRow>();
        require_send::<domain::MacroSeries>();
        require_sync::<domain::MacroSeries>();

        require_send::<data::RawBar>();
        require_sync::<data::RawBar>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::FredProvider>();
        require_sync::<data::FredProvider>();
        require_send::<data::SnapshotStore>();
        require_sync::<data::SnapshotStore>();
        require_send::<macro_align::MacroInputs>();
        require_sync::<macro_align::MacroInputs>();
    }

    /// Providers are usable as trait objects by the runner.
    #[test]
    fn providers_are_object_safe() {
        fn _market(provider: &dyn data::MarketDataProvider, symbol: &str) {
            let _ = provider.fetch_history(symbol);
        }
        fn _macro(provider: &dyn data::MacroDataProvider, id: &str, start: chrono::NaiveDate) {
            let _ = provider.fetch_series(id, start);
        }
    }
}
