use rand::Rng;
use tracing::{debug, trace};

use super::{Heuristic, Interrupt, SearchContext};
use crate::{Formula, ParameterError, SearchOutcome};

/// Simulated annealing over random single variable flips.
///
/// A flip that does not lower the number of satisfied clauses is always
/// kept. A worsening flip by `delta` clauses is kept with probability
/// `exp(-delta / temperature)` (Metropolis acceptance). The temperature is
/// multiplied by `1 - cooling_rate` after every proposal, and the search
/// ends once every clause is satisfied or the temperature drops below 1.
/// The formula is left in the best assignment visited, never below the
/// starting one.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedAnnealing {
    temperature: f64,
    cooling_rate: f64,
}

impl SimulatedAnnealing {
    pub fn new(temperature: f64, cooling_rate: f64) -> Result<SimulatedAnnealing, ParameterError> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(ParameterError::Temperature(temperature));
        }
        if !(cooling_rate > 0.0 && cooling_rate < 1.0) {
            return Err(ParameterError::CoolingRate(cooling_rate));
        }
        Ok(SimulatedAnnealing { temperature, cooling_rate })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn cooling_rate(&self) -> f64 {
        self.cooling_rate
    }
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        SimulatedAnnealing {
            temperature: 25000.0,
            cooling_rate: 0.0008,
        }
    }
}

impl Heuristic for SimulatedAnnealing {
    fn search(&self, formula: &mut Formula, context: &mut SearchContext) -> SearchOutcome {
        let (_, interrupted) = anneal(formula, *self, &mut context.rng, &context.interrupt);
        SearchOutcome::of(formula).interrupted(interrupted)
    }
}

impl Formula {
    /// Runs [`SimulatedAnnealing`] with random choices drawn from `rng`.
    /// Returns whether every clause got satisfied, in which case the formula
    /// holds the satisfying assignment. Otherwise the formula holds the best
    /// assignment visited.
    pub fn simulated_annealing<R: Rng + ?Sized>(
        &mut self,
        temperature: f64,
        cooling_rate: f64,
        rng: &mut R,
    ) -> Result<bool, ParameterError> {
        let params = SimulatedAnnealing::new(temperature, cooling_rate)?;
        let (satisfied, _) = anneal(self, params, rng, &Interrupt::never());
        Ok(satisfied)
    }
}

/// Returns whether all clauses got satisfied and whether the search was interrupted.
fn anneal<R: Rng + ?Sized>(
    formula: &mut Formula,
    params: SimulatedAnnealing,
    rng: &mut R,
    interrupt: &Interrupt,
) -> (bool, bool) {
    let num_clauses = formula.num_clauses();
    let num_variables = formula.num_variables();
    let mut temperature = params.temperature;
    let mut current = formula.count_satisfied();
    let mut best = current;

    if best == num_clauses || num_variables == 0 {
        return (best == num_clauses, false);
    }
    let mut best_values = formula.snapshot();

    while temperature >= 1.0 {
        if interrupt.is_raised() {
            debug!("Annealing interrupted at temperature {} with best {}", temperature, best);
            formula.restore(&best_values);
            return (false, true);
        }
        trace!("Current temperature: {}", temperature);

        let var = rng.gen_range(0, num_variables);
        formula.flip(var);
        let neighbour = formula.count_satisfied();

        let accepted = neighbour >= current || {
            let delta = neighbour as f64 - current as f64;
            rng.gen::<f64>() < (delta / temperature).exp()
        };
        if accepted {
            current = neighbour;
        } else {
            formula.flip(var);
        }

        if current > best {
            best = current;
            best_values.copy_from_slice(formula.assignment());
        }
        if best == num_clauses {
            debug!("Annealing satisfied all {} clauses at temperature {}", num_clauses, temperature);
            return (true, false);
        }
        temperature *= 1.0 - params.cooling_rate;
    }

    debug!("Annealing cooled down with best {} of {}", best, num_clauses);
    formula.restore(&best_values);
    (false, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(SimulatedAnnealing::new(100.0, 0.0).unwrap_err(), ParameterError::CoolingRate(0.0));
        assert_eq!(SimulatedAnnealing::new(100.0, 1.0).unwrap_err(), ParameterError::CoolingRate(1.0));
        assert_eq!(SimulatedAnnealing::new(-1.0, 0.5).unwrap_err(), ParameterError::Temperature(-1.0));
        assert!(SimulatedAnnealing::new(f64::INFINITY, 0.5).is_err());
        assert!(SimulatedAnnealing::new(10.0, 0.5).is_ok());
    }

    #[test]
    fn satisfies_unit_clause() {
        let mut formula = Formula::with_assignment(vec![false], vec![vec![1]]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(formula.simulated_annealing(100.0, 0.01, &mut rng).unwrap());
        assert!(formula.value(0));
    }

    #[test]
    fn already_satisfied_returns_immediately() {
        let mut formula = Formula::with_assignment(vec![true, false], vec![vec![1], vec![-2]]).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(formula.simulated_annealing(1000.0, 0.1, &mut rng).unwrap());
        assert_eq!(formula.assignment(), &[true, false]);
    }

    #[test]
    fn unsatisfiable_reports_false() {
        let mut formula = Formula::with_assignment(vec![true], vec![vec![1], vec![-1]]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        assert!(!formula.simulated_annealing(50.0, 0.05, &mut rng).unwrap());
        assert_eq!(formula.count_satisfied(), 1);
    }

    #[test]
    fn cold_start_does_nothing() {
        let mut formula = Formula::with_assignment(vec![false], vec![vec![1]]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!formula.simulated_annealing(0.5, 0.1, &mut rng).unwrap());
        assert_eq!(formula.assignment(), &[false]);
    }

    #[test]
    fn leaves_best_assignment_behind() {
        // hot enough to walk away from x1 = true; the best state is restored
        for seed in 0..200 {
            let mut formula = Formula::with_assignment(vec![true], vec![vec![1], vec![-1], vec![1]]).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(!formula.simulated_annealing(1000.0, 0.3, &mut rng).unwrap());
            assert_eq!(formula.count_satisfied(), 2, "seed {}", seed);
            assert!(formula.value(0));
        }
    }

    #[test]
    fn seeded_runs_agree() {
        let specs = vec![vec![1, -2], vec![2, 3], vec![-1, -3], vec![1, 3], vec![-2, -3]];
        let mut first = Formula::with_assignment(vec![false; 3], specs.clone()).unwrap();
        let mut second = Formula::with_assignment(vec![false; 3], specs).unwrap();

        let a = first.simulated_annealing(30.0, 0.01, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = second.simulated_annealing(30.0, 0.01, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(first.assignment(), second.assignment());
    }
}
