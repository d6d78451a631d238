//! Distribution reporter. Read-only counts written to the run log.

use crate::config::ReportThresholds;
use crate::logging::RunLog;

/// Counts over the generated result sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultDistribution {
    /// `> large_above`
    pub large: usize,
    /// `< small_below`
    pub small: usize,
    /// Everything else; `large + small + normal` equals the sequence length.
    pub normal: usize,
}

impl ResultDistribution {
    pub fn of(results: &[f64], t: &ReportThresholds) -> Self {
        let mut d = Self::default();
        for &r in results {
            if r > t.large_above {
                d.large += 1;
            } else if r < t.small_below {
                d.small += 1;
            } else {
                d.normal += 1;
            }
        }
        d
    }

    pub fn total(&self) -> usize {
        self.large + self.small + self.normal
    }
}

/// Counts over the input value column.
///
/// The bands are open intervals, so values equal to a boundary are not
/// counted anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueDistribution {
    pub above_high: usize,
    pub between_mid_high: usize,
    pub between_low_mid: usize,
    pub below_low: usize,
}

impl ValueDistribution {
    pub fn of(values: &[f64], t: &ReportThresholds) -> Self {
        let mut d = Self::default();
        for &v in values {
            if v > t.value_high {
                d.above_high += 1;
            } else if t.value_mid < v && v < t.value_high {
                d.between_mid_high += 1;
            } else if t.value_low < v && v < t.value_mid {
                d.between_low_mid += 1;
            } else if v < t.value_low {
                d.below_low += 1;
            }
        }
        d
    }

    pub fn counted(&self) -> usize {
        self.above_high + self.between_mid_high + self.between_low_mid + self.below_low
    }
}

pub fn log_result_distribution(log: &RunLog, d: &ResultDistribution) {
    log.separator();
    log.info(format!(
        "The number of large values detected in the generated results array is {}",
        d.large
    ));
    log.info(format!(
        "The number of small values detected in the generated results array is {}",
        d.small
    ));
    log.info(format!(
        "The number of normal values detected in the generated results array is {}",
        d.normal
    ));
    log.separator();
}

pub fn log_value_distribution(log: &RunLog, d: &ValueDistribution, t: &ReportThresholds) {
    let high = t.value_high;
    let mid = t.value_mid;
    let low = t.value_low;
    log.info(format!(
        "There are {} values that are greater than {high}!",
        d.above_high
    ));
    log.separator();
    log.info(format!(
        "There are {} values that are greater than {mid} but less than {high}!",
        d.between_mid_high
    ));
    log.separator();
    log.info(format!(
        "There are {} values that are greater than {low} but less than {mid}!",
        d.between_low_mid
    ));
    log.separator();
    log.info(format!("There are {} negative values!", d.below_low));
    log.separator();
}
