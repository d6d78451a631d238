use crate::config::ClassifierThresholds;

use super::model::{ClassifiedRow, ClassifiedTable, Level};

/// Bucket one value: `> high_above` is High, `(medium_above, high_above]` is
/// Medium, everything else (NaN included) is Low.
pub fn level_of(value: f64, thresholds: &ClassifierThresholds) -> Level {
    if value > thresholds.high_above {
        Level::High
    } else if value > thresholds.medium_above {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Attach a `Level` to every row of the value column.
pub fn classify(values: &[f64], thresholds: &ClassifierThresholds) -> ClassifiedTable {
    let rows = values
        .iter()
        .map(|&value| ClassifiedRow {
            value,
            level: level_of(value, thresholds),
        })
        .collect();
    ClassifiedTable { rows }
}
