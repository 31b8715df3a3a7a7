//! Ingest: turn a provider's raw bars into a clean, date-ordered price history.
//!
//! Steps, in order:
//! 1. stable sort by date (same-day bars keep provider order)
//! 2. drop bars whose close is missing
//! 3. auto-adjust OHLC by `adj_close / close` so every price is split/dividend adjusted

use super::provider::{RawBar, SkipReason};

/// Clean a fetched history. Errors when nothing usable remains.
pub fn ingest(mut bars: Vec<RawBar>) -> Result<Vec<RawBar>, SkipReason> {
    if bars.is_empty() {
        return Err(SkipReason::NoData);
    }

    bars.sort_by_key(|b| b.date);
    bars.retain(|b| b.close.is_finite());

    if bars.is_empty() {
        return Err(SkipReason::NoValidClose);
    }

    for bar in &mut bars {
        auto_adjust(bar);
    }

    Ok(bars)
}

/// Keep only the first bar seen for each date. Input must be sorted by date.
pub fn dedupe_dates(mut bars: Vec<RawBar>) -> Vec<RawBar> {
    bars.dedup_by_key(|b| b.date);
    bars
}

/// Scale OHLC by the adjusted/raw close ratio. Bars without a usable adjusted
/// close are left as-is.
fn auto_adjust(bar: &mut RawBar) {
    if !bar.adj_close.is_finite() || bar.close == 0.0 {
        return;
    }
    let ratio = bar.adj_close / bar.close;
    bar.open *= ratio;
    bar.high *= ratio;
    bar.low *= ratio;
    bar.close = bar.adj_close;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(date: &str, close: f64, adj_close: f64) -> RawBar {
        RawBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1000.0,
            adj_close,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    #[test]
    fn empty_history_is_no_data() {
        assert!(matches!(ingest(Vec::new()), Err(SkipReason::NoData)));
    }

    #[test]
    fn all_null_close_is_no_valid_close() {
        let bars = vec![bar("2024-01-02", f64::NAN, f64::NAN)];
        assert!(matches!(ingest(bars), Err(SkipReason::NoValidClose)));
    }

    #[test]
    fn sorts_and_drops_null_close() {
        let bars = vec![
            bar("2024-01-04", 12.0, 12.0),
            bar("2024-01-02", 10.0, 10.0),
            bar("2024-01-03", f64::NAN, f64::NAN),
        ];
        let out = ingest(bars).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].close, 10.0);
        assert_eq!(out[1].close, 12.0);
    }

    #[test]
    fn adjusts_ohlc_by_adj_close_ratio() {
        let out = ingest(vec![bar("2024-01-02", 100.0, 50.0)]).unwrap();
        assert_eq!(out[0].close, 50.0);
        assert_eq!(out[0].open, 50.0);
        assert_eq!(out[0].high, 51.0);
        assert_eq!(out[0].low, 49.0);
    }

    #[test]
    fn missing_adj_close_keeps_raw_prices() {
        let out = ingest(vec![bar("2024-01-02", 100.0, f64::NAN)]).unwrap();
        assert_eq!(out[0].close, 100.0);
        assert_eq!(out[0].high, 102.0);
    }

    #[test]
    fn dedupe_keeps_first_per_date() {
        let bars = vec![
            bar("2024-01-02", 10.0, 10.0),
            bar("2024-01-02", 11.0, 11.0),
            bar("2024-01-03", 12.0, 12.0),
        ];
        let out = dedupe_dates(bars);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].close, 10.0);
    }
}
