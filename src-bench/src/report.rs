//! Per-problem results and the sinks receiving them

use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use mixint_de::recorder::write_diversity_trace;
use mixint_de::{DiversityRecord, Encoding, EngineState, NUMBER_OF_TARGET, Problem, TargetHits};

use crate::error::Result;

/// Number of points on the hit curve, `e = 0.000, 0.001, ..., 4.000`
pub const HIT_CURVE_POINTS: usize = 4001;
/// Points per unit of exponent
pub const HIT_CURVE_RESOLUTION: f64 = 1000.0;

/// Targets hit within `dimension * 10^e` evaluations, for every exponent of the curve
pub fn hit_curve(hits: &TargetHits, dimension: usize) -> Vec<(f64, usize)> {
    (0..HIT_CURVE_POINTS)
        .map(|k| {
            let e = k as f64 / HIT_CURVE_RESOLUTION;
            (e, hits.count_within(dimension as f64 * 10f64.powf(e)))
        })
        .collect()
}

/// Outcome of all engine calls on one problem
#[derive(Debug, Clone)]
pub struct ProblemResult {
    pub encoding: Encoding,
    pub state: EngineState,
    /// Engine calls that spent evaluations
    pub calls: usize,
    pub elapsed: Duration,
    /// `(exponent, hit_count)` pairs
    pub hit_curve: Vec<(f64, usize)>,
    /// Diversity trace, when recording was enabled
    pub diversity: Option<Vec<DiversityRecord>>,
}

/// Receives the result of every problem of a sweep
pub trait ReportSink {
    fn report(&mut self, problem: &Problem, result: &ProblemResult) -> Result<()>;

    /// Called once after the last problem
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Keeps every result in memory
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    pub results: Vec<(Problem, ProblemResult)>,
    pub finished: bool,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemoryReportSink {
    fn report(&mut self, problem: &Problem, result: &ProblemResult) -> Result<()> {
        self.results.push((problem.clone(), result.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Sum of hit curves over the instances of one configuration
#[derive(Debug, Clone)]
struct Summary {
    hits: Vec<usize>,
    instances: usize,
}

/// Writes one report per problem below `<root>/de/` and a summary per configuration.
pub struct FileReportSink {
    root: PathBuf,
    summaries: BTreeMap<PathBuf, (Encoding, Summary)>,
}

impl FileReportSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), summaries: BTreeMap::new() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the configuration `problem` belongs to
    pub fn config_dir(&self, problem: &Problem) -> PathBuf {
        self.root
            .join("de")
            .join(problem.function().short_name())
            .join(format!("{}d", problem.dimension()))
            .join(format!("r{}_u{}", problem.integer_ratio(), problem.integer_upper()))
    }

    /// Report file of one problem
    pub fn report_path(&self, problem: &Problem, encoding: Encoding) -> PathBuf {
        self.config_dir(problem).join(format!("{}-{}.txt", encoding.label(), problem.instance()))
    }

    /// Diversity trace file of one problem
    pub fn diversity_path(&self, problem: &Problem, encoding: Encoding) -> PathBuf {
        self.config_dir(problem).join(format!("{}-{}-sd.txt", encoding.label(), problem.instance()))
    }

    fn write_curve(path: &Path, curve: &[(f64, usize)]) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (e, count) in curve {
            writeln!(out, "{:.3} {}", e, count)?;
        }
        out.flush()?;
        Ok(())
    }

    fn write_diversity(path: &Path, records: &[DiversityRecord]) -> Result<()> {
        write_diversity_trace(records, BufWriter::new(File::create(path)?))?;
        Ok(())
    }
}

impl ReportSink for FileReportSink {
    fn report(&mut self, problem: &Problem, result: &ProblemResult) -> Result<()> {
        let dir = self.config_dir(problem);
        create_dir_all(&dir)?;

        let path = self.report_path(problem, result.encoding);
        Self::write_curve(&path, &result.hit_curve)?;
        log::debug!("wrote {}", path.display());

        if let Some(records) = &result.diversity {
            Self::write_diversity(&self.diversity_path(problem, result.encoding), records)?;
        }

        let (_, summary) = self.summaries.entry(dir).or_insert_with(|| {
            (result.encoding, Summary { hits: vec![0; HIT_CURVE_POINTS], instances: 0 })
        });
        for (acc, (_, count)) in summary.hits.iter_mut().zip(&result.hit_curve) {
            *acc += count;
        }
        summary.instances += 1;
        Ok(())
    }

    /// Write `<label>-summary.txt` holding the mean hit rate per exponent
    fn finish(&mut self) -> Result<()> {
        for (dir, (encoding, summary)) in &self.summaries {
            let path = dir.join(format!("{}-summary.txt", encoding.label()));
            let denom = (NUMBER_OF_TARGET * summary.instances) as f64;
            let mut out = BufWriter::new(File::create(&path)?);
            for (k, hits) in summary.hits.iter().enumerate() {
                writeln!(out, "{:.3} {:.6}", k as f64 / HIT_CURVE_RESOLUTION, *hits as f64 / denom)?;
            }
            out.flush()?;
            log::info!("summary over {} instances written to {}", summary.instances, path.display());
        }
        Ok(())
    }
}
