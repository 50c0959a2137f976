//! Unimodal test functions
//!
//! Bowl-shaped and valley-shaped functions with a single global minimum at
//! the origin of the shifted coordinates.

use ndarray::Array1;

/// Exponent ratio `i / (n - 1)` used by the conditioned functions.
/// A one-dimensional problem has no conditioning.
fn ratio(i: usize, n: usize) -> f64 {
    if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 }
}

/// Sphere function - separable, unimodal
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn sphere(z: &Array1<f64>) -> f64 {
    z.iter().map(|&zi| zi * zi).sum::<f64>()
}

/// Ellipsoid function - separable, conditioning 1e6
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn ellipsoid(z: &Array1<f64>) -> f64 {
    let n = z.len();
    z.iter()
        .enumerate()
        .map(|(i, &zi)| 10f64.powf(6.0 * ratio(i, n)) * zi * zi)
        .sum::<f64>()
}

/// Rosenbrock function, moved so that its valley ends at z = 0
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn rosenbrock(z: &Array1<f64>) -> f64 {
    let mut sum = 0.0;
    for i in 0..z.len().saturating_sub(1) {
        let wi = z[i] + 1.0;
        let wi_plus_1 = z[i + 1] + 1.0;
        sum += 100.0 * (wi.powi(2) - wi_plus_1).powi(2) + (wi - 1.0).powi(2);
    }
    sum
}

/// Bent cigar function - one sensitive direction out of a flat ridge
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn bent_cigar(z: &Array1<f64>) -> f64 {
    if z.is_empty() {
        return 0.0;
    }
    let first = z[0].powi(2);
    let rest: f64 = z.iter().skip(1).map(|&zi| zi.powi(2)).sum();
    first + 1e6 * rest
}

/// Sharp ridge function - non-differentiable along the first axis
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn sharp_ridge(z: &Array1<f64>) -> f64 {
    if z.is_empty() {
        return 0.0;
    }
    let rest: f64 = z.iter().skip(1).map(|&zi| zi.powi(2)).sum();
    z[0].powi(2) + 100.0 * rest.sqrt()
}

/// Sum of different powers, square-rooted
/// Global minimum: f(z) = 0 at z = (0, 0, ..., 0)
pub fn different_powers(z: &Array1<f64>) -> f64 {
    let n = z.len();
    z.iter()
        .enumerate()
        .map(|(i, &zi)| zi.abs().powf(2.0 + 4.0 * ratio(i, n)))
        .sum::<f64>()
        .sqrt()
}
