//! Wall-clock accounting per dimension

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Accumulates time and evaluations per problem dimension
#[derive(Debug)]
pub struct TimingData {
    start: Instant,
    per_dimension: BTreeMap<usize, (Duration, usize)>,
}

impl Default for TimingData {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingData {
    pub fn new() -> Self {
        Self { start: Instant::now(), per_dimension: BTreeMap::new() }
    }

    /// Account for one solved problem
    pub fn record(&mut self, dimension: usize, evaluations: usize, elapsed: Duration) {
        let entry = self.per_dimension.entry(dimension).or_insert((Duration::ZERO, 0));
        entry.0 += elapsed;
        entry.1 += evaluations;
    }

    /// Seconds per evaluation for every dimension seen, in increasing dimension
    pub fn seconds_per_evaluation(&self) -> Vec<(usize, f64)> {
        self.per_dimension
            .iter()
            .filter(|(_, (_, evals))| *evals > 0)
            .map(|(&d, (time, evals))| (d, time.as_secs_f64() / *evals as f64))
            .collect()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log the per-dimension cost and the total time
    pub fn finalize(&self) {
        for (d, secs) in self.seconds_per_evaluation() {
            log::info!("d={} done in {:.2e} seconds/evaluation", d, secs);
        }
        log::info!("total elapsed time: {:.2} s", self.total_elapsed().as_secs_f64());
    }
}
