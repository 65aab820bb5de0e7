extern crate heuristics;

use criterion::{black_box, criterion_group, criterion_main, Criterion, BatchSize};
use heuristics::{
    Formula, FrequencyGreedy, Heuristic, LocalSearch, Preference, SearchContext,
    SimulatedAnnealing, TabuSearch,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SEED: u64 = 2020;

/// Uniform random 3-SAT instance
fn random_formula(num_variables: usize, num_clauses: usize, rng: &mut StdRng) -> Formula {
    let specs: Vec<Vec<i32>> = (0..num_clauses)
        .map(|_| (0..3)
            .map(|_| {
                let var = rng.gen_range(1, num_variables + 1) as i32;
                if rng.gen::<bool>() { var } else { -var }
            }).collect())
        .collect();
    Formula::new(num_variables, specs, rng).unwrap()
}

fn create_group_for_heuristic(c: &mut Criterion, name: &str, heuristic: impl Heuristic) {
    let mut group = c.benchmark_group(name);
    let mut rng = StdRng::seed_from_u64(SEED);

    // clause/variable ratio close to the 3-SAT phase transition
    for &num_variables in &[20usize, 50] {
        let formula = random_formula(num_variables, num_variables * 43 / 10, &mut rng);
        group.bench_function(format!("uf{}", num_variables), |b| {
            b.iter_batched(
                || formula.clone(),
                |mut formula| heuristic.search(black_box(&mut formula), &mut SearchContext::seeded(SEED)),
                BatchSize::SmallInput)
        });
    }

    group.finish()
}

fn criterion_benchmark(c: &mut Criterion) {
    create_group_for_heuristic(c, "Local Search", LocalSearch);
    create_group_for_heuristic(c, "Frequency", FrequencyGreedy::new(Preference::PreferMax));
    create_group_for_heuristic(c, "Tabu", TabuSearch::default());
    create_group_for_heuristic(c, "Annealing", SimulatedAnnealing::new(500.0, 0.01).unwrap());
}

criterion_group!{
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = criterion_benchmark
}
criterion_main!(benches);
