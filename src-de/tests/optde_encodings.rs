use mixint_de::{
    DEConfigBuilder, DiversityRecorder, Encoding, EngineState, NUMBER_OF_TARGET, Problem,
    Variable, differential_evolution,
};
use mixint_testfunctions::ObjectiveKind;
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn mixed_sphere() -> Problem {
    let mut variables = vec![Variable::Integer { upper: 7 }; 2];
    variables.extend(vec![Variable::Continuous { lower: -5.0, upper: 5.0 }; 3]);
    let optimal = Array1::from(vec![3.0, 6.0, 1.5, -2.0, 0.5]);
    Problem::new(ObjectiveKind::Sphere, variables, optimal, 0.4, 7, 0).unwrap()
}

#[test]
fn test_every_encoding_solves_mixed_sphere() {
    let problem = mixed_sphere();
    for encoding in Encoding::ALL {
        let config = DEConfigBuilder::new().encoding(encoding).build();
        let mut rng = StdRng::seed_from_u64(0xdeadbeef);
        let (state, report) =
            differential_evolution(&problem, EngineState::new(5), 50_000, config, &mut rng)
                .unwrap();

        assert!(report.success, "{} did not hit the tightest target: {:?}", encoding, report);
        assert_eq!(state.target_hits.count_hit(), NUMBER_OF_TARGET, "{}", encoding);
        // the incumbent is a decision vector: integer part on the grid
        let best = &state.best_solution_found;
        assert_eq!(best[0], 3.0, "{}", encoding);
        assert_eq!(best[1], 6.0, "{}", encoding);
    }
}

#[test]
fn test_internal_population_stays_in_range() {
    let problem = mixed_sphere();
    for encoding in Encoding::ALL {
        let config = DEConfigBuilder::new().encoding(encoding).build();
        let mut rng = StdRng::seed_from_u64(99);
        let (_, report) =
            differential_evolution(&problem, EngineState::new(5), 2_000, config, &mut rng)
                .unwrap();

        for row in report.population.rows() {
            for (x, var) in row.iter().zip(problem.variables().iter()) {
                let (lo, hi) = encoding.internal_range(var);
                assert!(*x >= lo && *x <= hi, "{}: {} outside [{}, {}]", encoding, x, lo, hi);
            }
        }
    }
}

#[test]
fn test_diversity_trace_every_dimension_generations() {
    let problem = mixed_sphere();
    let recorder = DiversityRecorder::new(problem.dimension());
    let config = DEConfigBuilder::new()
        .encoding(Encoding::UnitLm)
        .callback(recorder.create_callback())
        .build();
    let mut rng = StdRng::seed_from_u64(4);
    let (_, report) =
        differential_evolution(&problem, EngineState::new(5), 2_100, config, &mut rng).unwrap();

    // generations 0..=20 sampled every 5
    assert_eq!(report.nit, 20);
    let records = recorder.records();
    let gens: Vec<usize> = records.iter().map(|r| r.generation).collect();
    assert_eq!(gens, vec![0, 5, 10, 15, 20]);
    assert!(records.iter().all(|r| r.diversity.len() == 5));
    // the decoded integer spread cannot exceed half the range
    assert!(records.iter().all(|r| r.diversity[0] <= 3.5 + 1e-12));
}
