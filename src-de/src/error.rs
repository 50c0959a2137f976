//! Error types for the mixed-integer Differential Evolution engine.
//!
//! Every error is a precondition violation detected before any evaluation
//! is spent; the numeric core itself has no recoverable failure path.

use thiserror::Error;

/// Errors that can occur while setting up or running the DE engine.
#[derive(Debug, Error, PartialEq)]
pub enum DEError {
    /// The problem has no decision variable.
    #[error("problem has no decision variable")]
    EmptyProblem,

    /// A per-dimension vector does not match the problem dimension.
    #[error("{what} dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which vector is malformed
        what: &'static str,
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },

    /// A continuous lower bound exceeds its upper bound.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid variable
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The integer ratio is outside [0, 1].
    #[error("invalid integer ratio: {ratio} (must be in [0, 1])")]
    InvalidIntegerRatio {
        /// The invalid ratio
        ratio: f64,
    },

    /// Population size is too small (must be >= 4).
    #[error("population size ({pop_size}) must be >= 4")]
    PopulationTooSmall {
        /// The invalid population size
        pop_size: usize,
    },

    /// Mutation factor is out of valid range [0, 2].
    #[error("invalid mutation factor: {factor} (must be in [0, 2])")]
    InvalidMutationFactor {
        /// The invalid mutation factor
        factor: f64,
    },

    /// Crossover rate is out of valid range [0, 1].
    #[error("invalid crossover rate: {rate} (must be in [0, 1])")]
    InvalidCrossoverRate {
        /// The invalid crossover rate
        rate: f64,
    },
}

/// A specialized `Result` type for DE operations.
pub type Result<T> = std::result::Result<T, DEError>;

impl DEError {
    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, DEError::InvalidBounds { .. } | DEError::InvalidIntegerRatio { .. })
    }

    /// Returns `true` if this is a configuration-related error.
    ///
    /// This includes `PopulationTooSmall`, `InvalidMutationFactor`,
    /// and `InvalidCrossoverRate` variants.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DEError::PopulationTooSmall { .. }
                | DEError::InvalidMutationFactor { .. }
                | DEError::InvalidCrossoverRate { .. }
        )
    }

    /// Returns `true` if this is a malformed-problem error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, DEError::DimensionMismatch { .. } | DEError::EmptyProblem)
    }
}
