//! Moving statistics over short volume windows.

/// Number of sessions in the volume windows.
pub const VOLUME_WINDOW: usize = 5;

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N). Zero for an empty slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn trailing(values: &[f64], n: usize) -> &[f64] {
    &values[values.len().saturating_sub(n)..]
}

/// Standard deviation over mean of the trailing five values.
///
/// Returns 0 when that mean is exactly 0.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let window = trailing(values, VOLUME_WINDOW);
    let m = mean(window);
    if m == 0.0 {
        return 0.0;
    }
    population_std_dev(window) / m
}

/// Today's volume over the mean of the five sessions before today.
///
/// `prior_volumes` must exclude today; only its last five entries are used.
/// Returns 0 when that mean is exactly 0.
pub fn volume_ratio(today_volume: f64, prior_volumes: &[f64]) -> f64 {
    let m = mean(trailing(prior_volumes, VOLUME_WINDOW));
    if m == 0.0 {
        return 0.0;
    }
    today_volume / m
}
