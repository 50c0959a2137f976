//! Sweep driver: solve every generated problem and hand the results to a sink

use std::time::Instant;

use mixint_de::{DiversityRecorder, EngineState, Problem, differential_evolution};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::SweepConfig;
use crate::error::Result;
use crate::generator::enumerate_problems;
use crate::report::{ProblemResult, ReportSink, hit_curve};
use crate::timing::TimingData;

/// Totals of a finished sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    pub problems: usize,
    /// Problems whose tightest target was hit
    pub solved: usize,
    pub evaluations: usize,
    /// Problems skipped because building or solving them failed
    pub failed: usize,
}

/// Call the engine on `problem` until its tightest target is hit or its budget is spent.
///
/// Each call gets the evaluations still left, `dimension * budget_multiplier`
/// minus those already spent; there are at most `1 + independent_restarts` calls.
pub fn solve_problem(problem: &Problem, config: &SweepConfig, rng: &mut StdRng) -> Result<ProblemResult> {
    let start = Instant::now();
    let dimension = problem.dimension();
    let total_budget = config.total_budget(dimension);
    let recorder = config.record_diversity.then(|| DiversityRecorder::new(dimension));

    let mut state = EngineState::new(dimension);
    let mut calls = 0;
    for _ in 0..=config.independent_restarts {
        let remaining = state.remaining(total_budget);
        if state.target_hits.final_hit() || remaining == 0 {
            break;
        }

        let mut de_config = config.de_config();
        if let Some(recorder) = &recorder {
            de_config.callback = Some(recorder.create_callback());
        }
        let done = state.evaluation_count;
        let (next, report) = differential_evolution(problem, state, remaining, de_config, rng)?;
        state = next;

        if report.nfev == 0 {
            log::warn!(
                "{}: budget has not been exhausted ({}/{} evaluations done)",
                problem,
                done,
                total_budget
            );
            break;
        }
        calls += 1;
    }

    Ok(ProblemResult {
        encoding: config.encoding,
        hit_curve: hit_curve(&state.target_hits, dimension),
        state,
        calls,
        elapsed: start.elapsed(),
        diversity: recorder.map(|r| r.records()),
    })
}

/// Run the whole sweep described by `config`, reporting each problem to `sink`.
///
/// A single engine stream seeded with `config.seed` is shared by every problem.
/// A problem that fails to build or solve is logged and skipped. The sink is
/// always finished, even when one of its reports fails.
pub fn run_sweep<S: ReportSink + ?Sized>(config: &SweepConfig, sink: &mut S) -> Result<SweepSummary> {
    config.validate()?;
    let specs = enumerate_problems(config);
    log::info!(
        "sweep with encoding {}: {} problems, budget {} evaluations per dimension",
        config.encoding,
        specs.len(),
        config.budget_multiplier
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut timing = TimingData::new();
    let mut summary = SweepSummary { problems: 0, solved: 0, evaluations: 0, failed: 0 };

    for spec in &specs {
        let outcome = spec
            .build(config.seed)
            .and_then(|problem| solve_problem(&problem, config, &mut rng).map(|r| (problem, r)));
        let (problem, result) = match outcome {
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("skipping problem {} ({}): {}", spec.index, spec.function, e);
                summary.failed += 1;
                continue;
            }
        };

        let solved = result.state.target_hits.final_hit();
        log::debug!(
            "{}: {} targets, {} evaluations, {} call(s){}",
            problem,
            result.state.target_hits.count_hit(),
            result.state.evaluation_count,
            result.calls,
            if solved { ", solved" } else { "" }
        );
        timing.record(problem.dimension(), result.state.evaluation_count, result.elapsed);
        summary.problems += 1;
        summary.evaluations += result.state.evaluation_count;
        if solved {
            summary.solved += 1;
        }
        if let Err(e) = sink.report(&problem, &result) {
            // keep what was reported so far
            if let Err(finish_err) = sink.finish() {
                log::error!("closing the report sink failed: {}", finish_err);
            }
            return Err(e);
        }
    }

    sink.finish()?;
    timing.finalize();
    log::info!(
        "sweep done: {}/{} problems solved, {} evaluations, {} skipped",
        summary.solved,
        summary.problems,
        summary.evaluations,
        summary.failed
    );
    Ok(summary)
}
