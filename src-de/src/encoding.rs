//! Mixed-integer encodings
//!
//! An encoding fixes three things for a run: the internal range DE works in,
//! how a mutant escaping that range is repaired, and how an internal vector is
//! turned into the decision vector handed to the objective.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayViewMut1};
use serde::{Deserialize, Serialize};

use crate::decode_to_decision_space::decode_to_decision_space;
use crate::quantize_unit_interval::quantize_unit_interval;
use crate::round_to_integer_grid::round_to_integer_grid;
use crate::variable::Variable;

/// Single precision machine epsilon, keeps padded upper bounds off the next grid point.
pub const FLT_EPSILON: f64 = f32::EPSILON as f64;

/// Internal representation of the search space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Internal vector lives in the decision space
    Direct,
    /// Every coordinate lives in `[0, 1]`
    UnitInterval,
    /// Decision space with integer ranges padded by half a unit
    OffsetDirect,
}

/// When rounding or decoding is written back into the internal vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    /// The internal vector is replaced by its rounded form
    Lamarckian,
    /// Only a working copy is rounded; the internal vector keeps its precision
    Baldwinian,
}

/// Bin representative used by the Lamarckian unit-interval encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantization {
    /// Saturate the outer bins, midpoint elsewhere
    Floor,
    /// Bin midpoint
    Midpoint,
    /// Nearer bin boundary
    Boundary,
}

/// Encoding strategy applied to the whole population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    #[default]
    DirectL,
    DirectB,
    UnitLf,
    UnitLm,
    UnitLb,
    UnitB,
    OffsetL,
    OffsetB,
}

impl Encoding {
    pub const ALL: [Encoding; 8] = [
        Encoding::DirectL,
        Encoding::DirectB,
        Encoding::UnitLf,
        Encoding::UnitLm,
        Encoding::UnitLb,
        Encoding::UnitB,
        Encoding::OffsetL,
        Encoding::OffsetB,
    ];

    /// Short label used in report file names
    pub fn label(&self) -> &'static str {
        match self {
            Encoding::DirectL => "L",
            Encoding::DirectB => "B",
            Encoding::UnitLf => "U-Lf",
            Encoding::UnitLm => "U-Lm",
            Encoding::UnitLb => "U-Lb",
            Encoding::UnitB => "U-B",
            Encoding::OffsetL => "U2-L",
            Encoding::OffsetB => "U2-B",
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            Encoding::DirectL | Encoding::DirectB => Scheme::Direct,
            Encoding::UnitLf | Encoding::UnitLm | Encoding::UnitLb | Encoding::UnitB => {
                Scheme::UnitInterval
            }
            Encoding::OffsetL | Encoding::OffsetB => Scheme::OffsetDirect,
        }
    }

    pub fn approach(&self) -> Approach {
        match self {
            Encoding::DirectB | Encoding::UnitB | Encoding::OffsetB => Approach::Baldwinian,
            _ => Approach::Lamarckian,
        }
    }

    /// Quantization step, only for the Lamarckian unit-interval encodings
    pub fn quantization(&self) -> Option<Quantization> {
        match self {
            Encoding::UnitLf => Some(Quantization::Floor),
            Encoding::UnitLm => Some(Quantization::Midpoint),
            Encoding::UnitLb => Some(Quantization::Boundary),
            _ => None,
        }
    }

    /// Valid internal range `(lo, hi)` of one variable
    pub fn internal_range(&self, var: &Variable) -> (f64, f64) {
        match (self.scheme(), *var) {
            (Scheme::UnitInterval, _) => (0.0, 1.0),
            (Scheme::OffsetDirect, Variable::Integer { upper }) => {
                (-0.5, upper as f64 + 0.5 - FLT_EPSILON)
            }
            (_, var) => (var.lower(), var.upper()),
        }
    }

    /// Map a uniform draw `u` in `[0, 1)` onto the internal range.
    pub fn sample(&self, var: &Variable, u: f64) -> f64 {
        let (lo, hi) = self.internal_range(var);
        lo + u * (hi - lo)
    }

    /// Pull an out-of-range mutant coordinate halfway back from the violated
    /// bound toward `anchor`; in-range values pass through.
    pub fn repair(&self, value: f64, anchor: f64, var: &Variable) -> f64 {
        let (lo, hi) = self.internal_range(var);
        if value < lo {
            (lo + anchor) / 2.0
        } else if value > hi {
            (hi + anchor) / 2.0
        } else {
            value
        }
    }

    /// Encode one internal vector `x`, writing the decision vector into `decoded`.
    pub fn encode(
        &self,
        mut x: ArrayViewMut1<'_, f64>,
        mut decoded: ArrayViewMut1<'_, f64>,
        variables: &[Variable],
    ) {
        match (self.scheme(), self.approach()) {
            (Scheme::Direct | Scheme::OffsetDirect, Approach::Lamarckian) => {
                round_to_integer_grid(x.view_mut(), variables);
                decoded.assign(&x);
            }
            (Scheme::Direct | Scheme::OffsetDirect, Approach::Baldwinian) => {
                decoded.assign(&x);
                round_to_integer_grid(decoded, variables);
            }
            (Scheme::UnitInterval, approach) => {
                if approach == Approach::Lamarckian {
                    if let Some(q) = self.quantization() {
                        quantize_unit_interval(x.view_mut(), variables, q);
                    }
                }
                decoded.assign(&x);
                decode_to_decision_space(decoded, variables);
            }
        }
    }
}

/// Encode every row of `internal` in place and return the decoded population.
pub fn encode_population(
    internal: &mut Array2<f64>,
    variables: &[Variable],
    encoding: Encoding,
) -> Array2<f64> {
    let mut decoded = Array2::zeros(internal.raw_dim());
    for (x, d) in internal.rows_mut().into_iter().zip(decoded.rows_mut()) {
        encoding.encode(x, d, variables);
    }
    decoded
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Encoding {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_lowercase().replace('_', "-");
        match t.as_str() {
            "l" | "direct-l" | "directl" | "direct" => Ok(Encoding::DirectL),
            "b" | "direct-b" | "directb" => Ok(Encoding::DirectB),
            "u-lf" | "unit-lf" | "unitlf" => Ok(Encoding::UnitLf),
            "u-lm" | "unit-lm" | "unitlm" => Ok(Encoding::UnitLm),
            "u-lb" | "unit-lb" | "unitlb" => Ok(Encoding::UnitLb),
            "u-b" | "unit-b" | "unitb" => Ok(Encoding::UnitB),
            "u2-l" | "offset-l" | "offsetl" => Ok(Encoding::OffsetL),
            "u2-b" | "offset-b" | "offsetb" => Ok(Encoding::OffsetB),
            _ => Err(format!("unknown encoding: {}", s)),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Encoding> for String {
    fn from(e: Encoding) -> Self {
        e.label().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn vars() -> Vec<Variable> {
        vec![Variable::Integer { upper: 3 }, Variable::Continuous { lower: -5.0, upper: 5.0 }]
    }

    #[test]
    fn test_labels_parse_back() {
        for e in Encoding::ALL {
            assert_eq!(e.label().parse::<Encoding>().unwrap(), e);
            assert_eq!(e.to_string(), e.label());
        }
        assert_eq!("offset_b".parse::<Encoding>().unwrap(), Encoding::OffsetB);
        assert!("u3-l".parse::<Encoding>().is_err());
    }

    #[test]
    fn test_internal_ranges() {
        let int = Variable::Integer { upper: 3 };
        let cont = Variable::Continuous { lower: -5.0, upper: 5.0 };
        assert_eq!(Encoding::DirectL.internal_range(&int), (0.0, 3.0));
        assert_eq!(Encoding::UnitB.internal_range(&cont), (0.0, 1.0));
        assert_eq!(Encoding::OffsetL.internal_range(&int), (-0.5, 3.5 - FLT_EPSILON));
        assert_eq!(Encoding::OffsetB.internal_range(&cont), (-5.0, 5.0));
    }

    #[test]
    fn test_repair_halfway_to_anchor() {
        let int = Variable::Integer { upper: 3 };
        assert_eq!(Encoding::DirectL.repair(4.5, 2.0, &int), 2.5);
        assert_eq!(Encoding::DirectL.repair(-1.0, 1.0, &int), 0.5);
        assert_eq!(Encoding::DirectL.repair(1.7, 1.0, &int), 1.7);
        assert_eq!(Encoding::UnitLf.repair(-0.2, 0.4, &int), 0.2);
        assert!((Encoding::UnitLf.repair(1.3, 0.4, &int) - 0.7).abs() < 1e-15);
        assert_eq!(Encoding::OffsetB.repair(-2.0, 0.5, &int), 0.0);
    }

    #[test]
    fn test_lamarckian_rewrites_internal() {
        let mut pop = array![[1.6, 0.3], [2.4, -0.7]];
        let decoded = encode_population(&mut pop, &vars(), Encoding::DirectL);
        assert_eq!(pop, array![[2.0, 0.3], [2.0, -0.7]]);
        assert_eq!(decoded, pop);
    }

    #[test]
    fn test_baldwinian_keeps_internal() {
        let mut pop = array![[1.6, 0.3], [-0.4, -0.7]];
        let before = pop.clone();
        let decoded = encode_population(&mut pop, &vars(), Encoding::OffsetB);
        assert_eq!(pop, before);
        assert_eq!(decoded, array![[2.0, 0.3], [0.0, -0.7]]);
    }

    #[test]
    fn test_unit_interval_decodes() {
        let mut pop = array![[0.3, 0.5], [0.9, 0.0]];
        let decoded = encode_population(&mut pop, &vars(), Encoding::UnitLm);
        assert_eq!(pop, array![[0.375, 0.5], [0.875, 0.0]]);
        assert_eq!(decoded, array![[1.0, 0.0], [3.0, -5.0]]);

        let mut pop = array![[0.3, 0.5]];
        let decoded = encode_population(&mut pop, &vars(), Encoding::UnitB);
        assert_eq!(pop, array![[0.3, 0.5]]);
        assert_eq!(decoded, array![[1.0, 0.0]]);
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Encoding::UnitLb).unwrap();
        assert_eq!(json, "\"U-Lb\"");
        let back: Encoding = serde_json::from_str("\"u2-l\"").unwrap();
        assert_eq!(back, Encoding::OffsetL);
        assert!(serde_json::from_str::<Encoding>("\"nope\"").is_err());
    }
}
