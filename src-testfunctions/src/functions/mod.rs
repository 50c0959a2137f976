//! Test function implementations organized by category
//!
//! Every function here is written on the shifted vector `z = x - optimal`, so
//! its global minimum is `f(0) = 0`:
//! - `unimodal`: single-optimum functions (sphere, ellipsoid, bent cigar, ...)
//! - `multimodal`: functions with many local minima (rastrigin)

pub mod multimodal;
pub mod unimodal;

// Re-export all functions for easy access
pub use multimodal::*;
pub use unimodal::*;
