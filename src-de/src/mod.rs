//! Mixed-integer Differential Evolution in pure Rust using ndarray
//!
//! DE/rand/1/bin over problems whose variables are either integers in
//! `{0, ..., U}` or reals in `[lower, upper]`. The integer part is handled by an
//! [`Encoding`] chosen once per run, which decides the internal search range,
//! how out-of-range mutants are repaired and how an internal vector becomes the
//! decision vector handed to the objective.
//!
//! Supported features:
//! - Eight encodings: direct, unit-interval and offset-direct ranges, each with
//!   Lamarckian or Baldwinian rounding
//! - Resumable runs: every call consumes an [`EngineState`] and returns the next one
//! - First-hit bookkeeping against a ladder of 51 log-spaced targets
//! - Parallel objective evaluation on the rayon pool, deterministic for a given seed
//! - Per-generation callback, with a diversity recorder built on it

#![allow(missing_docs)]
use std::fmt;

use ndarray::{Array1, Array2};

pub mod error;
pub mod variable;

pub mod encoding;
pub mod decode_to_decision_space;
pub mod quantize_unit_interval;
pub mod round_to_integer_grid;

pub mod population;

pub mod distinct_indices;
pub mod mutant_rand1;
pub mod crossover_binomial;
pub mod selection;

pub mod differential_evolution;
pub mod parallel_eval;
pub mod problem;
pub mod recorder;
pub mod state;
pub mod targets;

pub use differential_evolution::{DifferentialEvolution, differential_evolution};
pub use encoding::{Approach, Encoding, FLT_EPSILON, Quantization, Scheme, encode_population};
pub use error::{DEError, Result};
pub use parallel_eval::ParallelConfig;
pub use population::Population;
pub use problem::Problem;
pub use recorder::{DiversityRecord, DiversityRecorder};
pub use state::{BEST_SOLUTION_SENTINEL, EngineState};
pub use targets::{NUMBER_OF_TARGET, TARGETS, TargetHits};
pub use variable::Variable;

/// Default population size
pub const DE_N: usize = 100;
/// Default mutation factor
pub const DE_F: f64 = 0.5;
/// Default crossover rate
pub const DE_CR: f64 = 0.9;

/// Index and value of the smallest entry, skipping NaN.
/// `None` when `v` is empty or all NaN.
pub(crate) fn argmin(v: &Array1<f64>) -> Option<(usize, f64)> {
	let mut best: Option<(usize, f64)> = None;
	for (i, &val) in v.iter().enumerate() {
		if val.is_nan() {
			continue;
		}
		match best {
			Some((_, b)) if val >= b => {}
			_ => best = Some((i, val)),
		}
	}
	best
}

/// Configuration for the Differential Evolution engine
pub struct DEConfig {
	pub popsize: usize,
	/// Mutation factor F in [0, 2]
	pub mutation: f64,
	/// Crossover rate CR in [0, 1]
	pub recombination: f64,
	pub encoding: Encoding,
	/// Parallel evaluation configuration
	pub parallel: ParallelConfig,
	/// Optional per-generation callback (may stop early)
	pub callback: Option<Box<dyn FnMut(&GenerationInfo) -> CallbackAction>>,
}

impl Default for DEConfig {
	fn default() -> Self {
		Self {
			popsize: DE_N,
			mutation: DE_F,
			recombination: DE_CR,
			encoding: Encoding::default(),
			parallel: ParallelConfig::default(),
			callback: None,
		}
	}
}

impl DEConfig {
	/// Check the numeric parameters
	pub fn validate(&self) -> Result<()> {
		if self.popsize < 4 {
			return Err(DEError::PopulationTooSmall { pop_size: self.popsize });
		}
		if !(0.0..=2.0).contains(&self.mutation) {
			return Err(DEError::InvalidMutationFactor { factor: self.mutation });
		}
		if !(0.0..=1.0).contains(&self.recombination) {
			return Err(DEError::InvalidCrossoverRate { rate: self.recombination });
		}
		Ok(())
	}
}

impl fmt::Debug for DEConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEConfig")
			.field("popsize", &self.popsize)
			.field("mutation", &self.mutation)
			.field("recombination", &self.recombination)
			.field("encoding", &self.encoding)
			.field("parallel", &self.parallel)
			.field("callback", &self.callback.is_some())
			.finish()
	}
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
pub struct DEConfigBuilder {
	cfg: DEConfig,
}
impl Default for DEConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}
impl DEConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: DEConfig::default() }
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.popsize = v;
		self
	}
	pub fn mutation(mut self, v: f64) -> Self {
		self.cfg.mutation = v;
		self
	}
	pub fn recombination(mut self, v: f64) -> Self {
		self.cfg.recombination = v;
		self
	}
	pub fn encoding(mut self, v: Encoding) -> Self {
		self.cfg.encoding = v;
		self
	}
	pub fn callback(mut self, cb: Box<dyn FnMut(&GenerationInfo) -> CallbackAction>) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		self.cfg.parallel = parallel;
		self
	}
	pub fn enable_parallel(mut self, enable: bool) -> Self {
		self.cfg.parallel.enabled = enable;
		self
	}
	pub fn parallel_threads(mut self, num_threads: usize) -> Self {
		self.cfg.parallel.num_threads = Some(num_threads);
		self
	}
	pub fn build(self) -> DEConfig {
		self.cfg
	}
}

/// Result/Report of one engine call
#[derive(Clone)]
pub struct DEReport {
	/// Best decoded vector of the final population
	pub x: Array1<f64>,
	pub fun: f64,
	/// Whether the tightest target was hit during this call
	pub success: bool,
	pub message: String,
	/// Generations run after the initial population
	pub nit: usize,
	/// Evaluations charged to this call
	pub nfev: usize,
	/// Final internal population
	pub population: Array2<f64>,
	pub population_energies: Array1<f64>,
}

impl fmt::Debug for DEReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DEReport")
			.field("x", &format!("len={}", self.x.len()))
			.field("fun", &self.fun)
			.field("success", &self.success)
			.field("message", &self.message)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field(
				"population",
				&format!("{}x{}", self.population.nrows(), self.population.ncols()),
			)
			.field("population_energies", &format!("len={}", self.population_energies.len()))
			.finish()
	}
}

/// Information passed to callback after each generation
pub struct GenerationInfo {
	/// 0 for the initial population
	pub generation: usize,
	/// Evaluations spent in the current call
	pub evaluations: usize,
	pub best_value: f64,
	pub best_x: Array1<f64>,
	/// Per-dimension standard deviation of the decoded population
	pub diversity: Array1<f64>,
}

/// Action returned by callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
	Continue,
	Stop,
}

#[cfg(test)]
mod config_tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let cfg = DEConfig::default();
		assert_eq!(cfg.popsize, 100);
		assert_eq!(cfg.mutation, 0.5);
		assert_eq!(cfg.recombination, 0.9);
		assert_eq!(cfg.encoding, Encoding::DirectL);
		assert!(cfg.parallel.enabled);
		assert!(cfg.validate().is_ok());
	}

	#[test]
	fn test_validate() {
		let cfg = DEConfigBuilder::new().popsize(3).build();
		assert_eq!(cfg.validate(), Err(DEError::PopulationTooSmall { pop_size: 3 }));
		let cfg = DEConfigBuilder::new().mutation(2.5).build();
		assert!(cfg.validate().unwrap_err().is_config_error());
		let cfg = DEConfigBuilder::new().recombination(-0.1).build();
		assert!(matches!(cfg.validate(), Err(DEError::InvalidCrossoverRate { .. })));
	}

	#[test]
	fn test_argmin_skips_nan() {
		assert_eq!(argmin(&Array1::from(vec![f64::NAN, 2.0, 1.0, 1.0])), Some((2, 1.0)));
		assert_eq!(argmin(&Array1::from(vec![f64::NAN, f64::NAN])), None);
		assert_eq!(argmin(&Array1::zeros(0)), None);
	}
}
