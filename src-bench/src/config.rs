//! Sweep configuration
//!
//! Every field has a default, so a JSON file only needs the fields it changes.

use std::path::{Path, PathBuf};

use mixint_de::{DEConfig, DEConfigBuilder, Encoding};
use mixint_testfunctions::ObjectiveKind;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Default seed of the engine random stream
pub const RANDOM_SEED: u64 = 0xdeadbeef;
/// Evaluations per dimension
pub const BUDGET_MULTIPLIER: usize = 10_000;
/// Maximum number of engine calls after the first one
pub const INDEPENDENT_RESTARTS: usize = 100_000;
/// Instances per configuration
pub const INSTANCES: usize = 15;

/// Configuration of a full sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub encoding: Encoding,
    pub functions: Vec<ObjectiveKind>,
    pub dimensions: Vec<usize>,
    pub integer_ratios: Vec<f64>,
    pub integer_uppers: Vec<u32>,
    pub instances: usize,
    pub budget_multiplier: usize,
    pub independent_restarts: usize,
    pub seed: u64,
    pub population_size: usize,
    pub mutation_factor: f64,
    pub crossover_rate: f64,
    pub parallel: bool,
    /// Write the per-problem diversity trace
    pub record_diversity: bool,
    /// Report root; resolved from the environment when unset
    pub output_dir: Option<PathBuf>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            encoding: Encoding::DirectL,
            functions: ObjectiveKind::ALL.to_vec(),
            dimensions: vec![5, 10, 20],
            integer_ratios: vec![0.25, 0.5, 0.75],
            integer_uppers: vec![1, 3, 7, 15],
            instances: INSTANCES,
            budget_multiplier: BUDGET_MULTIPLIER,
            independent_restarts: INDEPENDENT_RESTARTS,
            seed: RANDOM_SEED,
            population_size: mixint_de::DE_N,
            mutation_factor: mixint_de::DE_F,
            crossover_rate: mixint_de::DE_CR,
            parallel: true,
            record_diversity: false,
            output_dir: None,
        }
    }
}

impl SweepConfig {
    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: SweepConfig = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Reject empty axes and out-of-range parameters
    pub fn validate(&self) -> Result<()> {
        let axes = [
            ("functions", self.functions.is_empty()),
            ("dimensions", self.dimensions.is_empty()),
            ("integer_ratios", self.integer_ratios.is_empty()),
            ("integer_uppers", self.integer_uppers.is_empty()),
        ];
        for (name, empty) in axes {
            if empty {
                return Err(BenchError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        if self.instances == 0 {
            return Err(BenchError::InvalidConfig("instances must be positive".into()));
        }
        if self.budget_multiplier == 0 {
            return Err(BenchError::InvalidConfig("budget_multiplier must be positive".into()));
        }
        if let Some(d) = self.dimensions.iter().find(|&&d| d == 0) {
            return Err(BenchError::InvalidConfig(format!("invalid dimension: {}", d)));
        }
        if let Some(r) = self.integer_ratios.iter().find(|r| !(0.0..=1.0).contains(*r)) {
            return Err(BenchError::InvalidConfig(format!(
                "integer ratio {} outside [0, 1]",
                r
            )));
        }
        if self.integer_uppers.contains(&0) {
            return Err(BenchError::InvalidConfig("integer upper bounds must be positive".into()));
        }
        self.de_config().validate()?;
        Ok(())
    }

    /// Number of problems in the sweep
    pub fn problem_count(&self) -> usize {
        self.functions.len()
            * self.integer_ratios.len()
            * self.integer_uppers.len()
            * self.dimensions.len()
            * self.instances
    }

    /// Total evaluation budget of a problem of dimension `d`
    pub fn total_budget(&self, dimension: usize) -> usize {
        dimension * self.budget_multiplier
    }

    /// Engine configuration for one call; the callback is installed by the caller
    pub fn de_config(&self) -> DEConfig {
        DEConfigBuilder::new()
            .popsize(self.population_size)
            .mutation(self.mutation_factor)
            .recombination(self.crossover_rate)
            .encoding(self.encoding)
            .enable_parallel(self.parallel)
            .build()
    }
}

/// Parse an encoding label, mapping failures to `BenchError::UnknownEncoding`
pub fn parse_encoding(label: &str) -> Result<Encoding> {
    label.parse::<Encoding>().map_err(|_| BenchError::UnknownEncoding(label.to_string()))
}

/// Parse an objective name or `fN` label
pub fn parse_function(name: &str) -> Result<ObjectiveKind> {
    name.parse::<ObjectiveKind>().map_err(BenchError::InvalidConfig)
}
