use ndarray::Array1;

use crate::targets::TargetHits;

/// Coordinate value of `best_solution_found` before any evaluation, far outside every range
pub const BEST_SOLUTION_SENTINEL: f64 = 1e8;

/// Everything a resumed engine call needs from the calls before it
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Evaluations spent on the problem over all calls
    pub evaluation_count: usize,
    /// Best decoded vector seen so far
    pub best_solution_found: Array1<f64>,
    /// Objective value of `best_solution_found`, `+inf` before the first call
    pub best_value: f64,
    pub target_hits: TargetHits,
    /// Set while a call hits the tightest target; cleared when the call returns
    pub converged: bool,
}

impl EngineState {
    pub fn new(dimension: usize) -> Self {
        Self {
            evaluation_count: 0,
            best_solution_found: Array1::from_elem(dimension, BEST_SOLUTION_SENTINEL),
            best_value: f64::INFINITY,
            target_hits: TargetHits::new(),
            converged: false,
        }
    }

    pub fn dimension(&self) -> usize {
        self.best_solution_found.len()
    }

    /// Evaluations left under `total_budget`
    pub fn remaining(&self, total_budget: usize) -> usize {
        total_budget.saturating_sub(self.evaluation_count)
    }
}
