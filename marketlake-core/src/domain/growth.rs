//! Growth ratios over the fixed lookback windows.

use serde::{Deserialize, Serialize};

/// Lookback windows (in observations) for the `growth_{w}d` family.
pub const GROWTH_WINDOWS: [usize; 6] = [1, 3, 7, 30, 90, 365];

/// Forward horizon for the future-growth label.
pub const FUTURE_HORIZON: usize = 30;

/// The six `growth_{w}d` values for one row, in `GROWTH_WINDOWS` order.
///
/// `None` means the ratio is undefined (fewer than `w` prior observations).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrowthSet(pub [Option<f64>; 6]);

impl GrowthSet {
    /// Value for a specific window, or `None` if the window is unknown or undefined.
    pub fn get(&self, window: usize) -> Option<f64> {
        GROWTH_WINDOWS
            .iter()
            .position(|&w| w == window)
            .and_then(|i| self.0[i])
    }
}

/// Column name for a per-instrument growth ratio: `growth_30d`.
pub fn growth_column(window: usize) -> String {
    format!("growth_{window}d")
}

/// Column name for an index growth ratio: `growth_^GSPC_30d`.
///
/// The index name is part of the column so several indices can share one table.
pub fn index_growth_column(index: &str, window: usize) -> String {
    format!("growth_{index}_{window}d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_by_window() {
        let set = GrowthSet([Some(1.1), None, Some(1.3), None, None, Some(2.0)]);
        assert_eq!(set.get(1), Some(1.1));
        assert_eq!(set.get(3), None);
        assert_eq!(set.get(365), Some(2.0));
        assert_eq!(set.get(2), None);
    }

    #[test]
    fn column_names() {
        assert_eq!(growth_column(7), "growth_7d");
        assert_eq!(index_growth_column("^GSPC", 90), "growth_^GSPC_90d");
    }
}
