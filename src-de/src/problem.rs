use std::fmt;

use mixint_testfunctions::ObjectiveKind;
use ndarray::Array1;

use crate::error::{DEError, Result};
use crate::variable::Variable;

/// Immutable definition of one benchmark problem.
///
/// Only `Problem::new` builds one, so every instance has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    function: ObjectiveKind,
    variables: Vec<Variable>,
    optimal: Array1<f64>,
    integer_ratio: f64,
    integer_upper: u32,
    instance: usize,
}

impl Problem {
    /// Build a problem, checking that every per-dimension vector agrees.
    pub fn new(
        function: ObjectiveKind,
        variables: Vec<Variable>,
        optimal: Array1<f64>,
        integer_ratio: f64,
        integer_upper: u32,
        instance: usize,
    ) -> Result<Self> {
        if variables.is_empty() {
            return Err(DEError::EmptyProblem);
        }
        if optimal.len() != variables.len() {
            return Err(DEError::DimensionMismatch {
                what: "optimal",
                expected: variables.len(),
                got: optimal.len(),
            });
        }
        for (index, var) in variables.iter().enumerate() {
            if let Variable::Continuous { lower, upper } = *var {
                if !(lower <= upper) {
                    return Err(DEError::InvalidBounds { index, lower, upper });
                }
            }
        }
        if !(0.0..=1.0).contains(&integer_ratio) {
            return Err(DEError::InvalidIntegerRatio { ratio: integer_ratio });
        }
        Ok(Self { function, variables, optimal, integer_ratio, integer_upper, instance })
    }

    pub fn function(&self) -> ObjectiveKind {
        self.function
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Hidden optimum; integer coordinates hold integer values
    pub fn optimal(&self) -> &Array1<f64> {
        &self.optimal
    }

    /// Fraction of the variables that are integer-valued
    pub fn integer_ratio(&self) -> f64 {
        self.integer_ratio
    }

    /// Upper bound shared by the integer variables
    pub fn integer_upper(&self) -> u32 {
        self.integer_upper
    }

    pub fn instance(&self) -> usize {
        self.instance
    }

    pub fn dimension(&self) -> usize {
        self.variables.len()
    }

    pub fn integer_count(&self) -> usize {
        self.variables.iter().filter(|v| v.is_integer()).count()
    }

    /// Per-dimension lower bounds
    pub fn smallest(&self) -> Array1<f64> {
        self.variables.iter().map(Variable::lower).collect()
    }

    /// Per-dimension upper bounds
    pub fn largest(&self) -> Array1<f64> {
        self.variables.iter().map(Variable::upper).collect()
    }

    /// Objective value, which is also the error since every objective is 0 at the optimum
    pub fn evaluate(&self, x: &Array1<f64>) -> f64 {
        self.function.evaluate(x, &self.optimal)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} d={} ratio={} upper={} instance={}",
            self.function.short_name(),
            self.dimension(),
            self.integer_ratio,
            self.integer_upper,
            self.instance
        )
    }
}
