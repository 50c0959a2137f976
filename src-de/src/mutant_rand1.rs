use ndarray::{Array1, Array2};

use crate::encoding::Encoding;
use crate::variable::Variable;

/// DE/rand/1 mutant `pop[r0] + f * (pop[r1] - pop[r2])` with out-of-range repair.
///
/// A coordinate leaving the internal range of `encoding` is pulled back halfway
/// toward `pop[i][j]`, the coordinate of the current target `i`, not toward any donor.
pub fn mutant_rand1(
    i: usize,
    pop: &Array2<f64>,
    donors: &[usize],
    f: f64,
    variables: &[Variable],
    encoding: Encoding,
) -> Array1<f64> {
    let (r0, r1, r2) = (donors[0], donors[1], donors[2]);
    let mut mutant = &pop.row(r0) + &((&pop.row(r1) - &pop.row(r2)) * f);
    for (j, (m, var)) in mutant.iter_mut().zip(variables).enumerate() {
        *m = encoding.repair(*m, pop[[i, j]], var);
    }
    mutant
}
