//! Target ladder and first-hit bookkeeping

use std::sync::LazyLock;

/// Number of targets on the ladder
pub const NUMBER_OF_TARGET: usize = 51;

/// Decreasing, log-spaced error thresholds `10^(2 - 0.2k)`, from `1e2` down to `1e-8`.
pub static TARGETS: LazyLock<[f64; NUMBER_OF_TARGET]> = LazyLock::new(|| {
    let mut t = [0.0; NUMBER_OF_TARGET];
    for (k, v) in t.iter_mut().enumerate() {
        *v = 10f64.powf(2.0 - 0.2 * k as f64);
    }
    t
});

/// Evaluation count at which each target was first hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetHits {
    hits: [Option<usize>; NUMBER_OF_TARGET],
}

impl Default for TargetHits {
    fn default() -> Self {
        Self { hits: [None; NUMBER_OF_TARGET] }
    }
}

impl TargetHits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every target strictly above `best` that is not hit yet.
    ///
    /// A recorded slot is never rewritten, so hits only ever keep their
    /// earliest evaluation count. Returns the number of new hits.
    pub fn record(&mut self, best: f64, evaluations: usize) -> usize {
        if best.is_nan() {
            return 0;
        }
        let mut fresh = 0;
        for (slot, &target) in self.hits.iter_mut().zip(TARGETS.iter()) {
            if slot.is_none() && best < target {
                *slot = Some(evaluations);
                fresh += 1;
            }
        }
        fresh
    }

    pub fn get(&self, k: usize) -> Option<usize> {
        self.hits[k]
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.hits
    }

    /// Whether the tightest target has been hit
    pub fn final_hit(&self) -> bool {
        self.hits[NUMBER_OF_TARGET - 1].is_some()
    }

    pub fn count_hit(&self) -> usize {
        self.hits.iter().filter(|h| h.is_some()).count()
    }

    /// Number of targets hit within `evaluations` evaluations
    pub fn count_within(&self, evaluations: f64) -> usize {
        self.hits.iter().flatten().filter(|&&e| e as f64 <= evaluations).count()
    }

    /// Hits with `-1` for targets never reached
    pub fn to_sentinel_vec(&self) -> Vec<i64> {
        self.hits.iter().map(|h| h.map_or(-1, |e| e as i64)).collect()
    }
}
