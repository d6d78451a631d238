//! Result generation engine.
//!
//! Two independent rule passes turn the `value` column into derived numbers:
//!
//! * [`pass_a`] – size-dependent: a positional rule set when the dataset has
//!   more than `row_split` rows, a value-range rule set otherwise.
//! * [`pass_b`] – value-range buckets, each row's unit repeated `repeat` times.
//!
//! Both are pure functions of the column and the thresholds. The final
//! sequence is PassA's output followed by PassB's, each in row order.

pub mod pass_a;
pub mod pass_b;

use crate::config::Thresholds;

/// What one rule emits for one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission {
    One(f64),
    Two([f64; 2]),
    Five([f64; 5]),
}

impl Emission {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Emission::One(v) => std::slice::from_ref(v),
            Emission::Two(vs) => vs.as_slice(),
            Emission::Five(vs) => vs.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }
}

/// The two pass outputs of one engine run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineOutput {
    pub pass_a: Vec<f64>,
    pub pass_b: Vec<f64>,
}

impl EngineOutput {
    /// PassA output followed by PassB output.
    pub fn combined(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.pass_a);
        out.extend_from_slice(&self.pass_b);
        out
    }

    pub fn len(&self) -> usize {
        self.pass_a.len() + self.pass_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run both passes over the value column.
pub fn generate(values: &[f64], thresholds: &Thresholds) -> EngineOutput {
    EngineOutput {
        pass_a: pass_a::pass_a(values, &thresholds.pass_a),
        pass_b: pass_b::pass_b(values, &thresholds.pass_b),
    }
}

/// Flatten per-row emissions in row order.
fn flatten<I>(emissions: I, capacity: usize) -> Vec<f64>
where
    I: IntoIterator<Item = Emission>,
{
    let mut out = Vec::with_capacity(capacity);
    for e in emissions {
        out.extend_from_slice(e.as_slice());
    }
    out
}
