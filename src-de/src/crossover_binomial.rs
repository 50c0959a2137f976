use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// Binomial crossover of `target` with `mutant`.
///
/// Draws `j_rand = floor(u * D)` first, then one threshold per dimension; the
/// threshold at `j_rand` is forced to 0 so at least that coordinate comes from
/// the mutant. Coordinates whose threshold is `<= cr` inherit from the mutant.
pub fn binomial_crossover<R: Rng + ?Sized>(
    target: ArrayView1<'_, f64>,
    mutant: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let j_rand = (rng.random::<f64>() * n as f64) as usize;
    let mut thresholds: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
    thresholds[j_rand] = 0.0;

    let mut trial = target.to_owned();
    for (j, &t) in thresholds.iter().enumerate() {
        if t <= cr {
            trial[j] = mutant[j];
        }
    }
    trial
}
