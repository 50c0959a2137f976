//! Objective functions for mixed-integer benchmarking
//!
//! This library provides the seven synthetic objectives used by the encoding
//! benchmark. Each objective is evaluated on a decision vector `x` relative to
//! a hidden optimum, `f(x, optimal) = scale * g(x - optimal)`, so the error of
//! a candidate equals its objective value.
//!
//! - **Unimodal**: sphere, ellipsoid, rosenbrock, bent cigar, sharp ridge,
//!   different powers
//! - **Multimodal**: rastrigin
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use mixint_testfunctions::ObjectiveKind;
//!
//! let optimal = Array1::from_vec(vec![1.0, -2.0]);
//! assert_eq!(ObjectiveKind::Sphere.evaluate(&optimal, &optimal), 0.0);
//!
//! let kind: ObjectiveKind = "bent_cigar".parse().unwrap();
//! assert_eq!(kind.short_name(), "f12");
//! ```

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub mod functions;
pub use functions::*;

/// The objective functions known to the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Sphere,
    Ellipsoid,
    Rastrigin,
    Rosenbrock,
    BentCigar,
    SharpRidge,
    DifferentPowers,
}

impl ObjectiveKind {
    /// All objectives, in sweep order
    pub const ALL: [ObjectiveKind; 7] = [
        ObjectiveKind::Sphere,
        ObjectiveKind::Ellipsoid,
        ObjectiveKind::Rastrigin,
        ObjectiveKind::Rosenbrock,
        ObjectiveKind::BentCigar,
        ObjectiveKind::SharpRidge,
        ObjectiveKind::DifferentPowers,
    ];

    /// snake_case name, as accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            ObjectiveKind::Sphere => "sphere",
            ObjectiveKind::Ellipsoid => "ellipsoid",
            ObjectiveKind::Rastrigin => "rastrigin",
            ObjectiveKind::Rosenbrock => "rosenbrock",
            ObjectiveKind::BentCigar => "bent_cigar",
            ObjectiveKind::SharpRidge => "sharp_ridge",
            ObjectiveKind::DifferentPowers => "different_powers",
        }
    }

    /// Index of the matching function in the bbob suite
    pub fn bbob_index(&self) -> usize {
        match self {
            ObjectiveKind::Sphere => 1,
            ObjectiveKind::Ellipsoid => 2,
            ObjectiveKind::Rastrigin => 3,
            ObjectiveKind::Rosenbrock => 8,
            ObjectiveKind::BentCigar => 12,
            ObjectiveKind::SharpRidge => 13,
            ObjectiveKind::DifferentPowers => 14,
        }
    }

    /// Short `fN` label used for output directories
    pub fn short_name(&self) -> String {
        format!("f{}", self.bbob_index())
    }

    /// Multiplicative constant applied after the raw function
    pub fn scaling(&self) -> f64 {
        match self {
            ObjectiveKind::Sphere => 1.0,
            ObjectiveKind::Ellipsoid => 1e-3,
            ObjectiveKind::Rastrigin => 0.1,
            ObjectiveKind::Rosenbrock => 1e-2,
            ObjectiveKind::BentCigar => 1e-4,
            ObjectiveKind::SharpRidge => 0.1,
            ObjectiveKind::DifferentPowers => 1.0,
        }
    }

    /// Raw function on the shifted vector
    pub fn raw(&self) -> fn(&Array1<f64>) -> f64 {
        match self {
            ObjectiveKind::Sphere => sphere,
            ObjectiveKind::Ellipsoid => ellipsoid,
            ObjectiveKind::Rastrigin => rastrigin,
            ObjectiveKind::Rosenbrock => rosenbrock,
            ObjectiveKind::BentCigar => bent_cigar,
            ObjectiveKind::SharpRidge => sharp_ridge,
            ObjectiveKind::DifferentPowers => different_powers,
        }
    }

    /// Evaluate the scaled objective of `x` against the hidden optimum.
    ///
    /// Both vectors must have the same length.
    pub fn evaluate(&self, x: &Array1<f64>, optimal: &Array1<f64>) -> f64 {
        debug_assert_eq!(x.len(), optimal.len(), "x/optimal size mismatch");
        let z = x - optimal;
        self.scaling() * (self.raw())(&z)
    }
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectiveKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_lowercase().replace('-', "_");
        match t.as_str() {
            "sphere" | "f1" => Ok(ObjectiveKind::Sphere),
            "ellipsoid" | "ellipsoidal" | "f2" => Ok(ObjectiveKind::Ellipsoid),
            "rastrigin" | "f3" => Ok(ObjectiveKind::Rastrigin),
            "rosenbrock" | "f8" => Ok(ObjectiveKind::Rosenbrock),
            "bent_cigar" | "bentcigar" | "f12" => Ok(ObjectiveKind::BentCigar),
            "sharp_ridge" | "sharpridge" | "f13" => Ok(ObjectiveKind::SharpRidge),
            "different_powers" | "differentpowers" | "f14" => Ok(ObjectiveKind::DifferentPowers),
            _ => Err(format!("unknown function: {}", s)),
        }
    }
}

/// Metadata for an objective function
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
    /// Function name
    pub name: String,
    /// `fN` label
    pub short_name: String,
    /// Multiplicative constant applied to the raw function
    pub scaling: f64,
    /// Description of the function
    pub description: String,
    /// Whether the function is multimodal
    pub multimodal: bool,
}

/// Get metadata for all available objective functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
    let descriptions = [
        (ObjectiveKind::Sphere, "Separable quadratic bowl", false),
        (ObjectiveKind::Ellipsoid, "Separable ellipsoid with conditioning 1e6", false),
        (ObjectiveKind::Rastrigin, "Separable highly multimodal function", true),
        (ObjectiveKind::Rosenbrock, "Banana-shaped valley", false),
        (ObjectiveKind::BentCigar, "Narrow ridge along the first axis", false),
        (ObjectiveKind::SharpRidge, "Non-differentiable ridge along the first axis", false),
        (ObjectiveKind::DifferentPowers, "Increasing exponents per coordinate", false),
    ];

    let mut metadata = HashMap::new();
    for (kind, description, multimodal) in descriptions {
        metadata.insert(
            kind.name().to_string(),
            FunctionMetadata {
                name: kind.name().to_string(),
                short_name: kind.short_name(),
                scaling: kind.scaling(),
                description: description.to_string(),
                multimodal,
            },
        );
    }
    metadata
}
