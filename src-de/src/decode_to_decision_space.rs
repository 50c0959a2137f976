use ndarray::ArrayViewMut1;

use crate::variable::Variable;

/// Map a unit-interval vector onto the decision space.
///
/// Integer variables take `floor(u * (upper + 1))` clamped to `{0, ..., upper}`;
/// continuous variables are rescaled affinely, `lower + u * (upper - lower)`,
/// which is `10u - 5` on `[-5, 5]`.
pub fn decode_to_decision_space(mut x: ArrayViewMut1<'_, f64>, variables: &[Variable]) {
    for (xi, var) in x.iter_mut().zip(variables) {
        match *var {
            Variable::Integer { upper } => {
                let u = upper as f64;
                *xi = (*xi * (u + 1.0)).floor().clamp(0.0, u);
            }
            Variable::Continuous { lower, upper } => {
                *xi = lower + *xi * (upper - lower);
            }
        }
    }
}
