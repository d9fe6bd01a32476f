//! Numeric helpers shared by the level pipeline.

/// Arithmetic mean, summed left to right. Empty input yields NaN.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Relative distance of `value` from `reference`: `|(value - reference) / reference|`.
pub fn relative_distance(value: f64, reference: f64) -> f64 {
    ((value - reference) / reference).abs()
}

/// Round to `decimals` places with ties going toward positive infinity.
///
/// NaN stays NaN and infinities pass through unchanged.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / factor
}

/// Minimum that propagates NaN instead of skipping it.
pub fn min_propagating_nan(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.min(v)
        }
    })
}

/// Maximum that propagates NaN instead of skipping it.
pub fn max_propagating_nan(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}
