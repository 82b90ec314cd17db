/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
///
/// The sum starts from `+0.0`, so an all `-0.0` input averages to `0.0`.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().fold(0.0, |acc, v| acc + v) / values.len() as f64
}

/// Returns `part` as a percentage of `total`, or 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Rounds to one decimal place, ties to even on the exact binary value.
///
/// Goes through the `{:.1}` formatter so that a rounded value always prints
/// back as the same string the report shows.
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
