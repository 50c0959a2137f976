//! Multimodal test functions
//!
//! These functions have multiple local minima and are used to test the global
//! search capabilities and exploration of optimization algorithms.

use ndarray::Array1;

/// Rastrigin function - highly multimodal, with a local minimum near every
/// integer point of the shifted space
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn rastrigin(z: &Array1<f64>) -> f64 {
    let n = z.len() as f64;
    let sum_cos: f64 = z
        .iter()
        .map(|&zi| (2.0 * std::f64::consts::PI * zi).cos())
        .sum();
    let sum_sq: f64 = z.iter().map(|&zi| zi.powi(2)).sum();
    10.0 * (n - sum_cos) + sum_sq
}
