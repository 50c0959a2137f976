use serde::{Deserialize, Serialize};

/// Type and range of one decision variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// Integer-valued, ranging over `{0, 1, ..., upper}`
    Integer { upper: u32 },
    /// Real-valued in `[lower, upper]`
    Continuous { lower: f64, upper: f64 },
}

impl Variable {
    pub fn is_integer(&self) -> bool {
        matches!(self, Variable::Integer { .. })
    }

    /// Smallest value of the decision space
    pub fn lower(&self) -> f64 {
        match *self {
            Variable::Integer { .. } => 0.0,
            Variable::Continuous { lower, .. } => lower,
        }
    }

    /// Largest value of the decision space
    pub fn upper(&self) -> f64 {
        match *self {
            Variable::Integer { upper } => upper as f64,
            Variable::Continuous { upper, .. } => upper,
        }
    }
}
