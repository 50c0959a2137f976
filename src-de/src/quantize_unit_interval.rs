use ndarray::ArrayViewMut1;

use crate::encoding::{FLT_EPSILON, Quantization};
use crate::variable::Variable;

/// Representative of the bin holding `x` among the `upper + 1` equal bins of `[0, 1]`.
fn quantize(x: f64, upper: u32, quantization: Quantization) -> f64 {
    let bins = upper as f64 + 1.0;
    let width = 1.0 / bins;
    let half = width / 2.0;
    let last = upper as usize + 1;
    for k in 1..=last {
        let edge = width * k as f64;
        if x < edge {
            let prev = width * (k - 1) as f64;
            return match quantization {
                Quantization::Floor if k == 1 => 0.0,
                Quantization::Floor if k == last => 1.0,
                Quantization::Floor | Quantization::Midpoint => prev + half,
                Quantization::Boundary => {
                    if (x - edge).abs() < (x - prev).abs() {
                        edge - FLT_EPSILON
                    } else {
                        prev
                    }
                }
            };
        }
    }
    x
}

/// Snap every integer variable of a unit-interval vector onto a representative of its bin.
///
/// Values at or above 1 are left as they are; continuous variables are untouched.
pub fn quantize_unit_interval(
    mut x: ArrayViewMut1<'_, f64>,
    variables: &[Variable],
    quantization: Quantization,
) {
    for (xi, var) in x.iter_mut().zip(variables) {
        if let Variable::Integer { upper } = *var {
            *xi = quantize(*xi, upper, quantization);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode_to_decision_space::decode_to_decision_space;
    use ndarray::Array1;

    fn quantized(values: &[f64], upper: u32, q: Quantization) -> Vec<f64> {
        let vars = vec![Variable::Integer { upper }; values.len()];
        let mut x = Array1::from(values.to_vec());
        quantize_unit_interval(x.view_mut(), &vars, q);
        x.to_vec()
    }

    #[test]
    fn test_floor_saturates_first_and_last_bin() {
        // four bins of width 0.25
        let got = quantized(&[0.1, 0.3, 0.6, 0.9], 3, Quantization::Floor);
        assert_eq!(got, vec![0.0, 0.375, 0.625, 1.0]);
    }

    #[test]
    fn test_midpoint() {
        let got = quantized(&[0.1, 0.3, 0.9], 3, Quantization::Midpoint);
        assert_eq!(got, vec![0.125, 0.375, 0.875]);
    }

    #[test]
    fn test_boundary_prefers_nearer_edge() {
        let got = quantized(&[0.05, 0.2, 0.125], 3, Quantization::Boundary);
        assert_eq!(got[0], 0.0);
        assert_eq!(got[1], 0.25 - FLT_EPSILON);
        // equidistant goes to the lower edge
        assert_eq!(got[2], 0.0);
    }

    #[test]
    fn test_values_at_one_untouched() {
        let got = quantized(&[1.0, 1.2], 3, Quantization::Midpoint);
        assert_eq!(got, vec![1.0, 1.2]);
    }

    #[test]
    fn test_binary_dimension_floor_threshold() {
        let vars = vec![Variable::Integer { upper: 1 }; 4];
        let mut x = Array1::from(vec![0.0, 0.49, 0.5, 0.99]);
        quantize_unit_interval(x.view_mut(), &vars, Quantization::Floor);
        decode_to_decision_space(x.view_mut(), &vars);
        assert_eq!(x.to_vec(), vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_quantize_then_decode_lands_on_grid() {
        for q in [Quantization::Floor, Quantization::Midpoint, Quantization::Boundary] {
            for upper in [1u32, 3, 7, 15] {
                let vars = vec![Variable::Integer { upper }; 101];
                let mut x = Array1::from_iter((0..=100).map(|k| k as f64 / 100.0));
                quantize_unit_interval(x.view_mut(), &vars, q);
                decode_to_decision_space(x.view_mut(), &vars);
                for &v in x.iter() {
                    assert_eq!(v, v.round(), "{:?} U={} gave {}", q, upper, v);
                    assert!((0.0..=upper as f64).contains(&v));
                }
            }
        }
    }
}
