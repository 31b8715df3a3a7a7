//! Feature Enricher: derived columns for one instrument's daily history.
//!
//! Every window is computed over the full history first; the `year >= 2000`
//! cut happens afterwards so early rows still feed the windows of kept rows.

use super::rolling::{future_growth, growth_ratios, rolling_mean, rolling_std};
use crate::data::ingest::{dedupe_dates, ingest};
use crate::data::provider::{RawBar, SkipReason};
use crate::domain::{
    EnrichedPricePoint, GrowthSet, PricePoint, FUTURE_HORIZON, GROWTH_WINDOWS, MIN_YEAR,
};

/// Short moving average window.
pub const SMA_SHORT: usize = 10;
/// Long moving average window.
pub const SMA_LONG: usize = 20;
/// Volatility lookback in observations.
pub const VOLATILITY_WINDOW: usize = 30;
/// Trading days per year used to annualize volatility.
pub const TRADING_DAYS: f64 = 252.0;

/// Compute all derived columns. `points` must be one instrument, sorted by date.
///
/// No rows are dropped here.
pub fn enrich(points: Vec<PricePoint>) -> Vec<EnrichedPricePoint> {
    let closes: Vec<f64> = points.iter().map(|p| p.close).collect();

    let growth: Vec<Vec<Option<f64>>> = GROWTH_WINDOWS
        .iter()
        .map(|&w| growth_ratios(&closes, w))
        .collect();
    let future = future_growth(&closes, FUTURE_HORIZON);
    let sma10 = rolling_mean(&closes, SMA_SHORT);
    let sma20 = rolling_mean(&closes, SMA_LONG);
    let annualize = TRADING_DAYS.sqrt();
    let volatility: Vec<Option<f64>> = rolling_std(&closes, VOLATILITY_WINDOW)
        .into_iter()
        .map(|s| s.map(|s| s * annualize))
        .collect();

    points
        .into_iter()
        .enumerate()
        .map(|(t, point)| {
            let mut set = GrowthSet::default();
            for (slot, column) in set.0.iter_mut().zip(&growth) {
                *slot = column[t];
            }

            EnrichedPricePoint {
                high_minus_low_relative: (point.high - point.low) / point.close,
                point,
                growth: set,
                growth_future_30d: future[t],
                sma10: sma10[t],
                sma20: sma20[t],
                growing_moving_average: flag(sma10[t], sma20[t]),
                volatility: volatility[t],
                is_positive_growth_30d_future: flag(future[t], Some(1.0)),
            }
        })
        .collect()
}

/// 1 when both sides are defined and `lhs > rhs`, otherwise 0.
fn flag(lhs: Option<f64>, rhs: Option<f64>) -> u8 {
    match (lhs, rhs) {
        (Some(a), Some(b)) if a > b => 1,
        _ => 0,
    }
}

/// Full per-instrument path: ingest, enrich, then drop rows before `MIN_YEAR`.
///
/// Empty or all-null histories are reported as a skip, never as rows.
pub fn enrich_instrument(
    symbol: &str,
    bars: Vec<RawBar>,
) -> Result<Vec<EnrichedPricePoint>, SkipReason> {
    let bars = dedupe_dates(ingest(bars)?);
    let points = bars
        .iter()
        .map(|bar| PricePoint::from_bar(symbol, bar))
        .collect();

    let mut rows = enrich(points);
    rows.retain(|r| r.point.year >= MIN_YEAR);
    Ok(rows)
}
