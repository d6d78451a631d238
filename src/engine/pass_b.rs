use super::{flatten, Emission};
use crate::config::PassBThresholds;

/// PassB over the whole column. Independent of the row count.
pub fn pass_b(values: &[f64], t: &PassBThresholds) -> Vec<f64> {
    let emissions = values
        .iter()
        .flat_map(|&v| std::iter::repeat(row_unit(v, t)).take(t.repeat));
    flatten(emissions, values.len() * t.repeat * 2)
}

/// The unit emitted for one row before repetition.
///
/// Buckets are checked in order: low even, low odd, high, then the middle
/// band `[low_below, high_above]` which emits two numbers.
pub fn row_unit(v: f64, t: &PassBThresholds) -> Emission {
    if v < t.low_below {
        if v % 2.0 == 0.0 {
            Emission::One(v + t.low_shift)
        } else {
            Emission::One(v - t.low_shift)
        }
    } else if v > t.high_above {
        Emission::One(v * t.high_multiplier)
    } else {
        Emission::Two([v + t.mid_spread, v - t.mid_spread])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> PassBThresholds {
        PassBThresholds::default()
    }

    #[test]
    fn bucket_priority() {
        assert_eq!(row_unit(4.0, &t()), Emission::One(14.0));
        assert_eq!(row_unit(-4.0, &t()), Emission::One(6.0));
        assert_eq!(row_unit(7.0, &t()), Emission::One(-3.0));
        assert_eq!(row_unit(-3.0, &t()), Emission::One(-13.0));
        assert_eq!(row_unit(49.0, &t()), Emission::One(39.0));
        assert_eq!(row_unit(50.0, &t()), Emission::Two([70.0, 30.0]));
        assert_eq!(row_unit(100.0, &t()), Emission::Two([120.0, 80.0]));
        assert_eq!(row_unit(101.0, &t()), Emission::One(202.0));
    }

    #[test]
    fn each_unit_repeats_three_times() {
        let out = pass_b(&[4.0, 60.0], &t());
        assert_eq!(
            out,
            vec![14.0, 14.0, 14.0, 80.0, 40.0, 80.0, 40.0, 80.0, 40.0]
        );
    }

    #[test]
    fn length_counts_two_element_rows_twice() {
        let values = [1.0, 55.0, 100.0, 150.0, 20.0];
        let units: usize = values.iter().map(|&v| row_unit(v, &t()).len()).sum();
        assert_eq!(units, 7);
        assert_eq!(pass_b(&values, &t()).len(), 3 * units);
    }
}
