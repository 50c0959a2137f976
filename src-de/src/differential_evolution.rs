use std::sync::Arc;
use std::time::{Duration, Instant};

use ndarray::{Array1, Array2};
use rand::Rng;

use crate::crossover_binomial::binomial_crossover;
use crate::distinct_indices::distinct_indices;
use crate::encoding::encode_population;
use crate::mutant_rand1::mutant_rand1;
use crate::parallel_eval::evaluate_population_parallel;
use crate::population::Population;
use crate::selection::select_survivors;
use crate::{
	CallbackAction, DEConfig, DEError, DEReport, EngineState, GenerationInfo, Problem, Result,
};

/// Differential Evolution engine bound to one problem
pub struct DifferentialEvolution<'a> {
	problem: &'a Problem,
	config: DEConfig,
}

impl<'a> DifferentialEvolution<'a> {
	pub fn new(problem: &'a Problem) -> Self {
		Self { problem, config: DEConfig::default() }
	}

	/// Mutable access to configuration
	pub fn config_mut(&mut self) -> &mut DEConfig {
		&mut self.config
	}

	fn notify(&mut self, generation: usize, nfev: usize, pop: &Population) -> CallbackAction {
		let Some(cb) = self.config.callback.as_mut() else {
			return CallbackAction::Continue;
		};
		let (best_value, best_x) = match pop.best() {
			Some((idx, value)) => (value, pop.decoded.row(idx).to_owned()),
			None => (f64::NAN, Array1::from_elem(pop.decoded.ncols(), f64::NAN)),
		};
		let info = GenerationInfo {
			generation,
			evaluations: nfev,
			best_value,
			best_x,
			diversity: pop.diversity(),
		};
		cb(&info)
	}

	/// Record the targets hit by the current population; returns true once the tightest is hit.
	fn track(state: &mut EngineState, pop: &Population, evaluations: usize) -> bool {
		if let Some((_, best)) = pop.best() {
			let fresh = state.target_hits.record(best, evaluations);
			if fresh > 0 {
				log::debug!("{} new target(s) hit at {} evaluations, best={:.6e}", fresh, evaluations, best);
			}
		}
		if state.target_hits.final_hit() {
			state.converged = true;
		}
		state.converged
	}

	/// Report of a call that spent no evaluation
	fn idle_report(state: &EngineState, success: bool, message: String) -> DEReport {
		let n = state.dimension();
		DEReport {
			x: state.best_solution_found.clone(),
			fun: state.best_value,
			success,
			message,
			nit: 0,
			nfev: 0,
			population: Array2::zeros((0, n)),
			population_energies: Array1::zeros(0),
		}
	}

	/// Run at most `max_budget` evaluations, resuming from `state`.
	///
	/// A generation only starts when a full population of evaluations still fits
	/// in the budget, so a budget below the population size spends nothing. A
	/// state whose tightest target is already hit is returned unchanged.
	pub fn solve<R: Rng + ?Sized>(
		&mut self,
		state: EngineState,
		max_budget: usize,
		rng: &mut R,
	) -> Result<(EngineState, DEReport)> {
		self.config.validate()?;
		let problem = self.problem;
		let n = problem.dimension();
		if state.dimension() != n {
			return Err(DEError::DimensionMismatch {
				what: "best_solution_found",
				expected: n,
				got: state.dimension(),
			});
		}

		let npop = self.config.popsize;
		let f = self.config.mutation;
		let cr = self.config.recombination;
		let encoding = self.config.encoding;
		let variables = problem.variables();
		let mut state = state;

		if state.target_hits.final_hit() {
			log::debug!("{}: tightest target already hit, nothing to do", problem);
			let report = Self::idle_report(&state, true, "Tightest target already hit".to_string());
			return Ok((state, report));
		}
		if max_budget < npop {
			log::debug!("budget {} below population size {}, nothing to do", max_budget, npop);
			let message = format!("Budget {} below population size {}", max_budget, npop);
			let report = Self::idle_report(&state, false, message);
			return Ok((state, report));
		}

		// Timing toggle via env var
		let timing_enabled = std::env::var("MIXINT_DE_TIMING").map(|v| v != "0").unwrap_or(false);

		// Configure global rayon thread pool once if requested
		if let Some(threads) = self.config.parallel.num_threads {
			// Ignore error if global pool already set
			let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
		}

		let energy_fn = Arc::new(move |x: &Array1<f64>| problem.evaluate(x));
		let start_count = state.evaluation_count;
		state.converged = false;

		let t_init0 = Instant::now();
		let mut pop = Population::initialize(npop, variables, encoding, rng);
		pop.energies = evaluate_population_parallel(&pop.decoded, energy_fn.clone(), &self.config.parallel);
		let mut nfev = npop;
		if timing_enabled {
			log::info!("TIMING init: {:.3} ms", t_init0.elapsed().as_secs_f64() * 1e3);
		}

		let mut stopped = Self::track(&mut state, &pop, start_count + nfev);
		if self.notify(0, nfev, &pop) == CallbackAction::Stop {
			stopped = true;
		}

		let mut nit = 0;
		let mut t_build_tot = Duration::ZERO;
		let mut t_eval_tot = Duration::ZERO;
		let mut t_select_tot = Duration::ZERO;

		while !stopped && nfev + npop <= max_budget {
			nit += 1;

			// Trials are built sequentially so the random stream is consumed in a fixed order
			let t_build0 = Instant::now();
			let mut trials = Array2::<f64>::zeros((npop, n));
			for i in 0..npop {
				let donors = distinct_indices(3, npop, rng);
				let mutant = mutant_rand1(i, &pop.internal, &donors, f, variables, encoding);
				let trial = binomial_crossover(pop.internal.row(i), &mutant, cr, rng);
				trials.row_mut(i).assign(&trial);
			}
			let trial_decoded = encode_population(&mut trials, variables, encoding);
			let t_build = t_build0.elapsed();

			let t_eval0 = Instant::now();
			let trial_energies =
				evaluate_population_parallel(&trial_decoded, energy_fn.clone(), &self.config.parallel);
			nfev += npop;
			let t_eval = t_eval0.elapsed();

			let t_select0 = Instant::now();
			let accepted = select_survivors(&mut pop, &trials, &trial_decoded, &trial_energies);
			let t_select = t_select0.elapsed();

			t_build_tot += t_build;
			t_eval_tot += t_eval;
			t_select_tot += t_select;
			if timing_enabled && (nit <= 5 || nit % 10 == 0) {
				log::info!(
					"TIMING iter {:4}: build={:.3} ms, eval={:.3} ms, select={:.3} ms",
					nit,
					t_build.as_secs_f64() * 1e3,
					t_eval.as_secs_f64() * 1e3,
					t_select.as_secs_f64() * 1e3,
				);
			}

			stopped = Self::track(&mut state, &pop, start_count + nfev);
			if log::log_enabled!(log::Level::Debug) {
				let best = pop.best().map_or(f64::NAN, |(_, v)| v);
				log::debug!(
					"DE gen {:5}  nfev={:7}  best={:.6e}  accepted={}/{}",
					nit,
					start_count + nfev,
					best,
					accepted,
					npop
				);
			}
			if self.notify(nit, nfev, &pop) == CallbackAction::Stop {
				stopped = true;
			}
		}

		if timing_enabled {
			log::info!(
				"TIMING total: build={:.3} s, eval={:.3} s, select={:.3} s",
				t_build_tot.as_secs_f64(),
				t_eval_tot.as_secs_f64(),
				t_select_tot.as_secs_f64()
			);
		}

		let success = state.converged;
		let message = if success {
			"Tightest target hit".to_string()
		} else if stopped {
			"Optimization stopped by callback".to_string()
		} else {
			format!("Budget exhausted: {} of {} evaluations", nfev, max_budget)
		};

		let (x, fun) = match pop.best() {
			Some((idx, _)) => {
				let candidate = pop.decoded.row(idx).to_owned();
				// re-evaluations below are not charged to the budget
				let candidate_value = problem.evaluate(&candidate);
				let stored_value = problem.evaluate(&state.best_solution_found);
				let replace = candidate_value < stored_value
					|| (!stored_value.is_finite() && candidate_value.is_finite());
				if replace {
					state.best_solution_found = candidate.clone();
					state.best_value = candidate_value;
				} else {
					state.best_value = stored_value;
				}
				(candidate, candidate_value)
			}
			None => {
				log::warn!("{}: every objective value is NaN, keeping the previous incumbent", problem);
				(Array1::from_elem(n, f64::NAN), f64::NAN)
			}
		};

		state.evaluation_count += nfev;
		state.converged = false;

		log::debug!(
			"{}: {} after {} generations, {} evaluations (total {}), {} targets hit",
			problem,
			message,
			nit,
			nfev,
			state.evaluation_count,
			state.target_hits.count_hit()
		);

		let report = DEReport {
			x,
			fun,
			success,
			message,
			nit,
			nfev,
			population: pop.internal,
			population_energies: pop.energies,
		};
		Ok((state, report))
	}
}

/// Convenience function: run one engine call on `problem` from `state`.
///
/// - `max_budget`: evaluations this call may spend
/// - `config`: DE configuration
/// - `rng`: the shared random stream
pub fn differential_evolution<R: Rng + ?Sized>(
	problem: &Problem,
	state: EngineState,
	max_budget: usize,
	config: DEConfig,
	rng: &mut R,
) -> Result<(EngineState, DEReport)> {
	let mut de = DifferentialEvolution::new(problem);
	*de.config_mut() = config;
	de.solve(state, max_budget, rng)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{DEConfigBuilder, Encoding, Variable};
	use mixint_testfunctions::ObjectiveKind;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::cell::RefCell;
	use std::rc::Rc;

	fn sphere(d: usize, ints: usize) -> Problem {
		let mut variables = vec![Variable::Integer { upper: 7 }; ints];
		variables.extend(vec![Variable::Continuous { lower: -5.0, upper: 5.0 }; d - ints]);
		let optimal = Array1::from_iter((0..d).map(|j| if j < ints { 3.0 } else { 1.5 }));
		Problem::new(ObjectiveKind::Sphere, variables, optimal, ints as f64 / d as f64, 7, 0).unwrap()
	}

	fn sequential() -> DEConfig {
		DEConfigBuilder::new().enable_parallel(false).build()
	}

	#[test]
	fn test_budget_below_population_is_noop() {
		let p = sphere(3, 1);
		let mut rng = StdRng::seed_from_u64(1);
		let state = EngineState::new(3);
		let (next, report) = differential_evolution(&p, state.clone(), 99, sequential(), &mut rng).unwrap();
		assert_eq!(next, state);
		assert_eq!(report.nfev, 0);
	}

	#[test]
	fn test_never_overshoots_budget() {
		let p = sphere(3, 1);
		let mut rng = StdRng::seed_from_u64(1);
		let (state, report) =
			differential_evolution(&p, EngineState::new(3), 1050, sequential(), &mut rng).unwrap();
		assert_eq!(report.nfev, 1000);
		assert_eq!(report.nit, 9);
		assert_eq!(state.evaluation_count, 1000);
		assert!(!state.converged);
	}

	#[test]
	fn test_deterministic_for_seed_and_thread_count() {
		let p = sphere(4, 2);
		let run = |parallel: bool| {
			let mut rng = StdRng::seed_from_u64(0xdeadbeef);
			let cfg = DEConfigBuilder::new().enable_parallel(parallel).build();
			differential_evolution(&p, EngineState::new(4), 3000, cfg, &mut rng).unwrap()
		};
		let (sa, ra) = run(false);
		let (sb, rb) = run(true);
		assert_eq!(sa, sb);
		assert_eq!(ra.population, rb.population);
	}

	#[test]
	fn test_incumbent_only_improves() {
		let p = sphere(3, 1);
		let mut rng = StdRng::seed_from_u64(5);
		let (s1, _) = differential_evolution(&p, EngineState::new(3), 2000, sequential(), &mut rng).unwrap();
		assert!(s1.best_value.is_finite());
		assert_eq!(p.evaluate(&s1.best_solution_found), s1.best_value);
		let (s2, _) = differential_evolution(&p, s1.clone(), 200, sequential(), &mut rng).unwrap();
		assert!(s2.best_value <= s1.best_value);
	}

	#[test]
	fn test_callback_sees_every_generation_and_can_stop() {
		let p = sphere(3, 0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let seen_cb = seen.clone();
		let cfg = DEConfigBuilder::new()
			.enable_parallel(false)
			.encoding(Encoding::UnitB)
			.callback(Box::new(move |info: &GenerationInfo| {
				seen_cb.borrow_mut().push((info.generation, info.evaluations, info.diversity.len()));
				if info.generation == 4 { CallbackAction::Stop } else { CallbackAction::Continue }
			}))
			.build();
		let mut rng = StdRng::seed_from_u64(2);
		let (_, report) = differential_evolution(&p, EngineState::new(3), 100_000, cfg, &mut rng).unwrap();
		assert_eq!(report.nit, 4);
		assert_eq!(report.nfev, 500);
		assert!(!report.success);
		let seen = seen.borrow();
		assert_eq!(seen.len(), 5);
		assert_eq!(seen[0], (0, 100, 3));
		assert_eq!(seen[4], (4, 500, 3));
	}

	#[test]
	fn test_nan_objective_records_nothing() {
		let variables = vec![Variable::Continuous { lower: -5.0, upper: 5.0 }; 2];
		let optimal = Array1::from_elem(2, f64::NAN);
		let p = Problem::new(ObjectiveKind::Sphere, variables, optimal, 0.0, 7, 0).unwrap();
		let mut rng = StdRng::seed_from_u64(3);
		let (state, report) = differential_evolution(&p, EngineState::new(2), 500, sequential(), &mut rng).unwrap();
		assert_eq!(state.target_hits.count_hit(), 0);
		assert_eq!(state.evaluation_count, 500);
		assert!(state.best_solution_found.iter().all(|&v| v == crate::BEST_SOLUTION_SENTINEL));
		assert!(report.fun.is_nan());
	}

	#[test]
	fn test_rejects_bad_inputs() {
		let p = sphere(3, 1);
		let mut rng = StdRng::seed_from_u64(1);
		let err = differential_evolution(&p, EngineState::new(2), 1000, sequential(), &mut rng).unwrap_err();
		assert!(err.is_dimension_error());
		let cfg = DEConfigBuilder::new().popsize(2).build();
		let err = differential_evolution(&p, EngineState::new(3), 1000, cfg, &mut rng).unwrap_err();
		assert!(err.is_config_error());
	}
}
