use ndarray::ArrayViewMut1;

use crate::variable::Variable;

/// Nearest integer of `{0, ..., upper}`; on a tie the smaller candidate wins.
fn nearest_integer(x: f64, upper: u32) -> f64 {
    let mut best = 0u32;
    let mut min_dist = x.abs();
    for k in 1..=upper {
        let dist = (k as f64 - x).abs();
        if dist < min_dist {
            min_dist = dist;
            best = k;
        }
    }
    best as f64
}

/// Snap every integer variable of `x` onto its grid `{0, ..., upper}`.
/// Continuous variables are left untouched.
pub fn round_to_integer_grid(mut x: ArrayViewMut1<'_, f64>, variables: &[Variable]) {
    for (xi, var) in x.iter_mut().zip(variables) {
        if let Variable::Integer { upper } = *var {
            *xi = nearest_integer(*xi, upper);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn vars() -> Vec<Variable> {
        vec![
            Variable::Integer { upper: 7 },
            Variable::Integer { upper: 3 },
            Variable::Continuous { lower: -5.0, upper: 5.0 },
        ]
    }

    #[test]
    fn test_rounds_integer_dimensions_only() {
        let mut x = Array1::from(vec![2.6, 1.2, 0.37]);
        round_to_integer_grid(x.view_mut(), &vars());
        assert_eq!(x.to_vec(), vec![3.0, 1.0, 0.37]);
    }

    #[test]
    fn test_ties_go_to_lower_candidate() {
        let mut x = Array1::from(vec![2.5, 0.5, 0.0]);
        round_to_integer_grid(x.view_mut(), &vars());
        assert_eq!(x[0], 2.0);
        assert_eq!(x[1], 0.0);
    }

    #[test]
    fn test_saturates_outside_grid() {
        let mut x = Array1::from(vec![-0.49, 9.3, 0.0]);
        round_to_integer_grid(x.view_mut(), &vars());
        assert_eq!(x[0], 0.0);
        assert_eq!(x[1], 3.0);

        // padded offset range: [-0.5, upper + 0.5) maps onto the grid
        let mut x = Array1::from(vec![-0.5, 3.4999, 0.0]);
        round_to_integer_grid(x.view_mut(), &vars());
        assert_eq!(x[0], 0.0);
        assert_eq!(x[1], 3.0);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let mut x = Array1::from(vec![5.7, 2.2, -1.25]);
        round_to_integer_grid(x.view_mut(), &vars());
        let once = x.clone();
        round_to_integer_grid(x.view_mut(), &vars());
        assert_eq!(x, once);
    }
}
