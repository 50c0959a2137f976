use ndarray::{Array1, Array2, Axis};
use rand::Rng;

use crate::argmin;
use crate::encoding::{Encoding, encode_population};
use crate::variable::Variable;

/// A DE population in internal and decoded form, with the objective of each decoded row
#[derive(Debug, Clone)]
pub struct Population {
    pub internal: Array2<f64>,
    pub decoded: Array2<f64>,
    pub energies: Array1<f64>,
}

impl Population {
    /// Sample `npop` individuals uniformly in the internal range of `encoding` and encode them.
    ///
    /// Energies start at `+inf` until the caller evaluates `decoded`.
    pub fn initialize<R: Rng + ?Sized>(
        npop: usize,
        variables: &[Variable],
        encoding: Encoding,
        rng: &mut R,
    ) -> Self {
        let mut internal = Array2::<f64>::zeros((npop, variables.len()));
        for mut row in internal.rows_mut() {
            for (x, var) in row.iter_mut().zip(variables) {
                *x = encoding.sample(var, rng.random::<f64>());
            }
        }
        let decoded = encode_population(&mut internal, variables, encoding);
        Self { internal, decoded, energies: Array1::from_elem(npop, f64::INFINITY) }
    }

    pub fn len(&self) -> usize {
        self.internal.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.nrows() == 0
    }

    /// Index and value of the smallest non-NaN energy
    pub fn best(&self) -> Option<(usize, f64)> {
        argmin(&self.energies)
    }

    /// Per-dimension standard deviation of the decoded population
    pub fn diversity(&self) -> Array1<f64> {
        self.decoded.std_axis(Axis(0), 0.0)
    }
}
