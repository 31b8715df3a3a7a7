//! Property tests for the derived-column invariants.
//!
//! Uses proptest to verify:
//! 1. Growth ratios match `close[t] / close[t - w]` and are undefined for the first `w` rows
//! 2. Label columns resolve to 0/1, never null
//! 3. Volatility is the annualized 30-observation sample standard deviation
//! 4. No enriched row survives from before 2000
//! 5. Forward-fill is idempotent and never fills backwards
//! 6. The index projector keeps one row per date

use chrono::{Duration, NaiveDate};
use marketlake_core::data::RawBar;
use marketlake_core::domain::{
    MacroColumn, MacroSeries, PricePoint, GROWTH_WINDOWS, MIN_YEAR,
};
use marketlake_core::features::enrich::{SMA_LONG, TRADING_DAYS, VOLATILITY_WINDOW};
use marketlake_core::features::{enrich, enrich_instrument, project_index};
use marketlake_core::macro_align::{align, forward_fill, MacroInputs};
use proptest::prelude::*;

fn bar(date: NaiveDate, close: f64) -> RawBar {
    RawBar {
        date,
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume: 1_000.0,
        adj_close: close,
        dividends: 0.0,
        stock_splits: 0.0,
    }
}

fn bars_from(start: NaiveDate, closes: &[f64]) -> Vec<RawBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| bar(start + Duration::days(i as i64), c))
        .collect()
}

fn points_from(start: NaiveDate, closes: &[f64]) -> Vec<PricePoint> {
    bars_from(start, closes)
        .iter()
        .map(|b| PricePoint::from_bar("PROP", b))
        .collect()
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2010, 1, 4).unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((1.0..1000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0), 1..max_len)
}

fn arb_sparse_column() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(-50.0..50.0_f64), 0..80)
}

/// Daily series on consecutive dates carrying `values`.
fn daily_series(id: &str, values: &[Option<f64>]) -> MacroSeries {
    let pairs: Vec<(NaiveDate, Option<f64>)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (start() + Duration::days(i as i64), v))
        .collect();
    MacroSeries::from_pairs(id, &pairs)
}

fn macro_inputs(dgs1: &[Option<f64>], dgs5: &[Option<f64>]) -> MacroInputs {
    MacroInputs {
        dgs1: daily_series("DGS1", dgs1),
        dgs5: daily_series("DGS5", dgs5),
        dgs10: MacroSeries::new("DGS10", Vec::new()),
        fedfunds: MacroSeries::new("FEDFUNDS", Vec::new()),
        gdppot: MacroSeries::new("GDPPOT", Vec::new()),
        cpilfesl: MacroSeries::new("CPILFESL", Vec::new()),
    }
}

// ── 1. Growth ratios ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn growth_matches_definition(closes in arb_closes(420)) {
        let rows = enrich(points_from(start(), &closes));
        prop_assert_eq!(rows.len(), closes.len());

        for (t, row) in rows.iter().enumerate() {
            for &w in GROWTH_WINDOWS.iter() {
                let value = row.growth.get(w);
                if t < w {
                    prop_assert!(value.is_none(), "growth_{}d defined at row {}", w, t);
                } else {
                    prop_assert_eq!(value, Some(closes[t] / closes[t - w]));
                }
            }
        }
    }
}

// ── 2. Labels never null ─────────────────────────────────────────────

proptest! {
    #[test]
    fn future_label_follows_future_growth(closes in arb_closes(120)) {
        let rows = enrich(points_from(start(), &closes));
        for row in &rows {
            let expected = u8::from(row.growth_future_30d.is_some_and(|g| g > 1.0));
            prop_assert_eq!(row.is_positive_growth_30d_future, expected);
        }
    }

    #[test]
    fn moving_average_flag_follows_smas(closes in arb_closes(120)) {
        let rows = enrich(points_from(start(), &closes));
        for (t, row) in rows.iter().enumerate() {
            let expected = match (row.sma10, row.sma20) {
                (Some(a), Some(b)) => u8::from(a > b),
                _ => 0,
            };
            prop_assert_eq!(row.growing_moving_average, expected);
            if t + 1 < SMA_LONG {
                prop_assert_eq!(row.growing_moving_average, 0);
            }
        }
    }
}

// ── 3. Volatility ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn volatility_is_annualized_sample_std(closes in arb_closes(90)) {
        let rows = enrich(points_from(start(), &closes));
        for (t, row) in rows.iter().enumerate() {
            if t + 1 < VOLATILITY_WINDOW {
                prop_assert!(row.volatility.is_none());
                continue;
            }
            let window = &closes[t + 1 - VOLATILITY_WINDOW..=t];
            let n = window.len() as f64;
            let mean = window.iter().sum::<f64>() / n;
            let var = window.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let expected = var.sqrt() * TRADING_DAYS.sqrt();

            let actual = row.volatility.unwrap();
            prop_assert!(
                (actual - expected).abs() <= 1e-9 * expected.max(1.0),
                "row {}: {} vs {}", t, actual, expected
            );
        }
    }
}

// ── 4. Year filter ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn no_row_before_2000(offset in 0i64..1500, closes in arb_closes(300)) {
        let first = NaiveDate::from_ymd_opt(1998, 1, 1).unwrap() + Duration::days(offset);
        let bars = bars_from(first, &closes);
        let kept_expected = bars.iter().filter(|b| b.date >= NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap()).count();

        let rows = enrich_instrument("PROP", bars).unwrap();
        prop_assert_eq!(rows.len(), kept_expected);
        prop_assert!(rows.iter().all(|r| r.point.year >= MIN_YEAR));
    }
}

// ── 5. Forward-fill ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn forward_fill_is_idempotent(column in arb_sparse_column()) {
        let once = forward_fill(&column);
        let twice = forward_fill(&once);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn forward_fill_never_fills_leading_gap(column in arb_sparse_column()) {
        let filled = forward_fill(&column);
        let leading = column.iter().take_while(|v| v.is_none()).count();
        prop_assert!(filled[..leading].iter().all(Option::is_none));
        prop_assert!(filled[leading..].iter().all(Option::is_some));
        for (original, after) in column.iter().zip(&filled) {
            if original.is_some() {
                prop_assert_eq!(original, after);
            }
        }
    }
}

proptest! {
    #[test]
    fn aligned_columns_are_already_filled(
        dgs1 in arb_sparse_column(),
        dgs5 in arb_sparse_column(),
    ) {
        let rows = align(&macro_inputs(&dgs1, &dgs5)).unwrap();
        prop_assert_eq!(rows.len(), dgs1.len());

        for column in [MacroColumn::Dgs1, MacroColumn::Dgs5] {
            let aligned: Vec<Option<f64>> = rows.iter().map(|r| r.value(column)).collect();
            prop_assert_eq!(&forward_fill(&aligned), &aligned);
        }

        // Values only ever come from the same or an earlier date
        let dgs5_on_backbone: Vec<Option<f64>> =
            (0..dgs1.len()).map(|i| dgs5.get(i).copied().flatten()).collect();
        let leading = dgs5_on_backbone.iter().take_while(|v| v.is_none()).count();
        prop_assert!(rows[..leading].iter().all(|r| r.dgs5.is_none()));
        for (row, original) in rows.iter().zip(&dgs5_on_backbone) {
            if original.is_some() {
                prop_assert_eq!(&row.dgs5, original);
            }
        }
    }
}

// ── 6. Index projector dedupe ────────────────────────────────────────

proptest! {
    #[test]
    fn index_rows_have_unique_dates(
        closes in arb_closes(60),
        repeats in prop::collection::vec(1usize..3, 60),
    ) {
        let mut bars = Vec::new();
        for (i, &c) in closes.iter().enumerate() {
            let date = start() + Duration::days(i as i64);
            for k in 0..repeats[i] {
                bars.push(bar(date, c + k as f64));
            }
        }

        let rows = project_index("^GSPC", bars).unwrap();
        prop_assert_eq!(rows.len(), closes.len());
        for pair in rows.windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }
}
