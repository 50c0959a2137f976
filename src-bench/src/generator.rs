//! Synthetic problem generator
//!
//! Enumerates function x integer ratio x integer upper bound x dimension x
//! instance, and draws a hidden optimum for each problem from its own seeded
//! stream so a problem is reproducible from `(seed, index)` alone.

use mixint_de::{Problem, Variable};
use mixint_testfunctions::ObjectiveKind;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SweepConfig;
use crate::error::Result;

/// Bound of the continuous variables
pub const CONTINUOUS_BOUND: f64 = 5.0;
/// Continuous optimum coordinates are drawn in `[-OPTIMUM_BOUND, OPTIMUM_BOUND]`
pub const OPTIMUM_BOUND: f64 = 4.0;

/// Coordinates of one problem in the sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemSpec {
    /// Position in enumeration order
    pub index: usize,
    pub function: ObjectiveKind,
    pub integer_ratio: f64,
    pub integer_upper: u32,
    pub dimension: usize,
    pub instance: usize,
}

impl ProblemSpec {
    /// Number of integer variables, `round(ratio * dimension)`
    pub fn integer_count(&self) -> usize {
        ((self.integer_ratio * self.dimension as f64).round() as usize).min(self.dimension)
    }

    /// Variables: the integer ones first, then continuous ones on `[-5, 5]`
    pub fn variables(&self) -> Vec<Variable> {
        let ints = self.integer_count();
        (0..self.dimension)
            .map(|j| {
                if j < ints {
                    Variable::Integer { upper: self.integer_upper }
                } else {
                    Variable::Continuous { lower: -CONTINUOUS_BOUND, upper: CONTINUOUS_BOUND }
                }
            })
            .collect()
    }

    /// Build the problem, drawing its optimum from a stream seeded with `seed + index`
    pub fn build(&self, seed: u64) -> Result<Problem> {
        let variables = self.variables();
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(self.index as u64));
        let optimal: Array1<f64> = variables
            .iter()
            .map(|var| match *var {
                Variable::Integer { upper } => rng.random_range(0..=upper) as f64,
                Variable::Continuous { .. } => rng.random_range(-OPTIMUM_BOUND..=OPTIMUM_BOUND),
            })
            .collect();
        let problem = Problem::new(
            self.function,
            variables,
            optimal,
            self.integer_ratio,
            self.integer_upper,
            self.instance,
        )?;
        Ok(problem)
    }
}

/// All problem coordinates of a sweep, in enumeration order
pub fn enumerate_problems(config: &SweepConfig) -> Vec<ProblemSpec> {
    let mut specs = Vec::with_capacity(config.problem_count());
    for &function in &config.functions {
        for &integer_ratio in &config.integer_ratios {
            for &integer_upper in &config.integer_uppers {
                for &dimension in &config.dimensions {
                    for instance in 0..config.instances {
                        specs.push(ProblemSpec {
                            index: specs.len(),
                            function,
                            integer_ratio,
                            integer_upper,
                            dimension,
                            instance,
                        });
                    }
                }
            }
        }
    }
    specs
}
