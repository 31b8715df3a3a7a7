//! Window primitives over a close-price series.
//!
//! All functions are positional: windows count observations, not calendar
//! days, so the input must already be ordered by date. Undefined outputs
//! (not enough history, or not enough future) are `None`.

/// `values[t] / values[t - window]`, undefined for the first `window` rows.
pub fn growth_ratios(values: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|t| {
            t.checked_sub(window)
                .filter(|_| window > 0)
                .map(|prev| values[t] / values[prev])
        })
        .collect()
}

/// `values[t + horizon] / values[t]`, undefined for the last `horizon` rows.
pub fn future_growth(values: &[f64], horizon: usize) -> Vec<Option<f64>> {
    let n = values.len();
    (0..n)
        .map(|t| {
            let ahead = t + horizon;
            (horizon > 0 && ahead < n).then(|| values[ahead] / values[t])
        })
        .collect()
}

/// Trailing simple moving average over the last `window` observations inclusive.
///
/// First defined value is at index `window - 1`.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if window == 0 || n < window {
        return result;
    }

    let mut sum: f64 = values[..window].iter().sum();
    result[window - 1] = Some(sum / window as f64);

    // Roll the window forward
    for i in window..n {
        sum += values[i] - values[i - window];
        result[i] = Some(sum / window as f64);
    }

    result
}

/// Trailing sample standard deviation (n - 1 denominator) over `window` observations.
///
/// Each window is computed from scratch around its own mean, which keeps
/// long histories free of running-sum drift.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut result = vec![None; n];

    if window < 2 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let sq: f64 = slice.iter().map(|v| (v - mean).powi(2)).sum();
        result[i] = Some((sq / (window - 1) as f64).sqrt());
    }

    result
}
