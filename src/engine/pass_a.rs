use super::{flatten, Emission};
use crate::config::PassAThresholds;

/// PassA over the whole column.
///
/// Rule set is chosen once from the row count `n`: positional rules when
/// `n > row_split`, value-range rules otherwise.
pub fn pass_a(values: &[f64], t: &PassAThresholds) -> Vec<f64> {
    let n = values.len();
    let emissions = values
        .iter()
        .enumerate()
        .map(|(i, &v)| row_emission(i, v, n, t));
    flatten(emissions, n * 5)
}

/// Emission for the row at `index` in a dataset of `n` rows.
pub fn row_emission(index: usize, value: f64, n: usize, t: &PassAThresholds) -> Emission {
    if n > t.row_split {
        positional_rule(index, value, t)
    } else {
        range_rule(value, t)
    }
}

/// Rules for datasets larger than `row_split`.
///
/// Even rows emit a single number. Odd rows adjust the value to `a` and emit
/// `[a, a*3, a, a, a*3]`.
fn positional_rule(index: usize, v: f64, t: &PassAThresholds) -> Emission {
    if index % 2 == 0 {
        return if v > t.even_split {
            Emission::One(v * t.even_multiplier)
        } else {
            Emission::One(v + t.even_offset)
        };
    }

    let a = if v < t.odd_pivot {
        v + t.odd_increment
    } else if v > t.odd_pivot {
        v - t.odd_decrement
    } else {
        v
    };
    let tripled = a * t.odd_scale;
    Emission::Five([a, tripled, a, a, tripled])
}

/// Rules for datasets of at most `row_split` rows. Position is irrelevant.
fn range_rule(v: f64, t: &PassAThresholds) -> Emission {
    if v < t.small_below {
        Emission::One(v * t.small_multiplier)
    } else if v > t.large_above {
        Emission::Five([v, v + 1.0, v + 2.0, v + 3.0, v + 4.0])
    } else {
        Emission::Five([v, v - 1.0, v - 2.0, v - 3.0, v - 4.0])
    }
}
