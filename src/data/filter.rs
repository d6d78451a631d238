use crate::config::FilterThresholds;

/// Return positions of rows whose value is strictly below the threshold.
///
/// Side information only: the engine never consults these indices.
pub fn indices_below(values: &[f64], thresholds: &FilterThresholds) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| **v < thresholds.below)
        .map(|(i, _)| i)
        .collect()
}
