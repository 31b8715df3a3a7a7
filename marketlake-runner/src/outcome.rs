//! Typed per-instrument outcomes and the batches they are collected into.

use marketlake_core::data::SkipReason;
use marketlake_core::domain::{EnrichedPricePoint, IndexGrowthRow, IndexGrowthTable};
use marketlake_core::features::merge_index_rows;

/// What happened to one instrument during a fetch stage.
#[derive(Debug)]
pub enum InstrumentOutcome {
    Fetched { symbol: String, rows: usize },
    Skipped { symbol: String, reason: SkipReason },
}

impl InstrumentOutcome {
    pub fn symbol(&self) -> &str {
        match self {
            InstrumentOutcome::Fetched { symbol, .. } | InstrumentOutcome::Skipped { symbol, .. } => {
                symbol
            }
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, InstrumentOutcome::Fetched { .. })
    }
}

/// Rows from one stage, concatenated in fetch order, plus one outcome per symbol.
#[derive(Debug)]
pub struct Batch<R> {
    pub rows: Vec<R>,
    pub outcomes: Vec<InstrumentOutcome>,
}

pub type StockBatch = Batch<EnrichedPricePoint>;
pub type IndexBatch = Batch<IndexGrowthRow>;

impl<R> Default for Batch<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            outcomes: Vec::new(),
        }
    }
}

impl<R> Batch<R> {
    /// Symbols that produced a result, in fetch order.
    pub fn successful_symbols(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.is_fetched())
            .map(InstrumentOutcome::symbol)
            .collect()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            InstrumentOutcome::Skipped { symbol, reason } => Some((symbol.as_str(), reason)),
            InstrumentOutcome::Fetched { .. } => None,
        })
    }

    pub fn fetched_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_fetched()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.fetched_count()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl IndexBatch {
    /// The wide index table built from every fetched index.
    pub fn table(&self) -> IndexGrowthTable {
        merge_index_rows(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_set_preserves_order() {
        let batch: StockBatch = Batch {
            rows: Vec::new(),
            outcomes: vec![
                InstrumentOutcome::Fetched {
                    symbol: "MSFT".into(),
                    rows: 10,
                },
                InstrumentOutcome::Skipped {
                    symbol: "DEAD".into(),
                    reason: SkipReason::NoData,
                },
                InstrumentOutcome::Fetched {
                    symbol: "AAPL".into(),
                    rows: 0,
                },
            ],
        };

        assert_eq!(batch.successful_symbols(), vec!["MSFT", "AAPL"]);
        assert_eq!(batch.fetched_count(), 2);
        assert_eq!(batch.skipped_count(), 1);

        let skipped: Vec<_> = batch.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, "DEAD");
        assert_eq!(skipped[0].1.to_string(), "no data available");
    }

    #[test]
    fn empty_index_batch_gives_empty_table() {
        assert!(IndexBatch::default().table().is_empty());
    }
}
