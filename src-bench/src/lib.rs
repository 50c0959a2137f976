//! Benchmark sweeps for mixed-integer Differential Evolution
//!
//! Generates synthetic mixed-integer problems, solves each one with the
//! encoding-aware engine of `mixint-de` under an evaluation budget proportional
//! to its dimension, and reports how many of the 51 targets were hit within
//! `dimension * 10^e` evaluations.
//!
//! # Example
//!
//! ```no_run
//! use mixint_bench::{MemoryReportSink, SweepConfig, run_sweep};
//!
//! let config = SweepConfig { dimensions: vec![5], instances: 2, ..SweepConfig::default() };
//! let mut sink = MemoryReportSink::new();
//! let summary = run_sweep(&config, &mut sink)?;
//! println!("{} of {} problems solved", summary.solved, summary.problems);
//! # Ok::<(), mixint_bench::BenchError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod report;
pub mod sweep;
pub mod timing;

pub use config::{SweepConfig, parse_encoding, parse_function};
pub use error::{BenchError, Result};
pub use generator::{ProblemSpec, enumerate_problems};
pub use report::{
    FileReportSink, HIT_CURVE_POINTS, MemoryReportSink, ProblemResult, ReportSink, hit_curve,
};
pub use sweep::{SweepSummary, run_sweep, solve_problem};
pub use timing::TimingData;
