use ndarray::{Array1, Array2};

use crate::population::Population;

/// Greedy one-to-one survivor selection.
///
/// Trial `i` replaces parent `i` when its value is `<=` the parent's; every
/// comparison uses the parent values from before the generation. A NaN trial
/// never survives and a NaN parent counts as `+inf`. Returns the number of
/// accepted trials.
pub fn select_survivors(
    pop: &mut Population,
    trials: &Array2<f64>,
    trial_decoded: &Array2<f64>,
    trial_energies: &Array1<f64>,
) -> usize {
    let mut accepted = 0;
    for (i, &value) in trial_energies.iter().enumerate() {
        let parent = pop.energies[i];
        if value <= parent || (parent.is_nan() && !value.is_nan()) {
            pop.internal.row_mut(i).assign(&trials.row(i));
            pop.decoded.row_mut(i).assign(&trial_decoded.row(i));
            pop.energies[i] = value;
            accepted += 1;
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_survivors_coordinate_wise() {
        let mut pop = Population {
            internal: array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
            decoded: array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]],
            energies: array![1.0, 2.0, 3.0, 4.0],
        };
        let parents = pop.clone();
        let trials = array![[0.4, 0.6], [1.4, 1.6], [2.4, 2.6], [3.4, 3.6]];
        let trial_decoded = array![[0.0, 0.6], [1.0, 1.6], [2.0, 2.6], [3.0, 3.6]];
        // better, tie, worse, NaN
        let trial_energies = array![0.5, 2.0, 3.5, f64::NAN];

        let accepted = select_survivors(&mut pop, &trials, &trial_decoded, &trial_energies);
        assert_eq!(accepted, 2);

        for i in 0..4 {
            let survives = trial_energies[i] <= parents.energies[i];
            if survives {
                assert_eq!(pop.internal.row(i), trials.row(i));
                assert_eq!(pop.decoded.row(i), trial_decoded.row(i));
                assert_eq!(pop.energies[i], trial_energies[i]);
            } else {
                assert_eq!(pop.internal.row(i), parents.internal.row(i));
                assert_eq!(pop.decoded.row(i), parents.decoded.row(i));
                assert_eq!(pop.energies[i], parents.energies[i]);
            }
        }
    }

    #[test]
    fn test_nan_parent_is_replaced_by_any_number() {
        let mut pop = Population {
            internal: array![[0.0], [1.0], [2.0]],
            decoded: array![[0.0], [1.0], [2.0]],
            energies: array![f64::NAN, f64::NAN, 1.0],
        };
        let trials = array![[0.5], [1.5], [2.5]];
        let trial_energies = array![1e6, f64::NAN, f64::INFINITY];

        let accepted = select_survivors(&mut pop, &trials, &trials, &trial_energies);
        assert_eq!(accepted, 1);
        assert_eq!(pop.internal[[0, 0]], 0.5);
        assert_eq!(pop.energies[0], 1e6);
        assert_eq!(pop.internal[[1, 0]], 1.0);
        assert!(pop.energies[1].is_nan());
        assert_eq!(pop.energies[2], 1.0);
    }
}
