use tracing::{debug, trace};

use super::{Heuristic, Interrupt, SearchContext};
use crate::{Formula, SearchOutcome};

/// Hill climbing over single variable flips.
///
/// Sweeps over all variables in index order, keeping every flip that
/// strictly increases the number of satisfied clauses, until a whole sweep
/// changes nothing. The result is a 1-flip local optimum. No randomness is
/// involved, the outcome only depends on the starting assignment.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalSearch;

impl Heuristic for LocalSearch {
    fn search(&self, formula: &mut Formula, context: &mut SearchContext) -> SearchOutcome {
        let interrupted = climb(formula, &context.interrupt);
        SearchOutcome::of(formula).interrupted(interrupted)
    }
}

impl Formula {
    /// Runs [`LocalSearch`] and returns the number of satisfied clauses.
    pub fn local_search(&mut self) -> usize {
        climb(self, &Interrupt::never());
        self.count_satisfied()
    }
}

/// Returns whether the climb was interrupted.
fn climb(formula: &mut Formula, interrupt: &Interrupt) -> bool {
    let mut best = formula.count_satisfied();
    let mut changed = true;
    let mut sweeps = 0;

    while changed {
        if interrupt.is_raised() {
            debug!("Local search interrupted after {} sweeps at {} satisfied", sweeps, best);
            return true;
        }
        changed = false;

        for var in 0..formula.num_variables() {
            formula.flip(var);
            let current = formula.count_satisfied();

            if current > best {
                best = current;
                changed = true;
            } else {
                formula.flip(var);
            }
        }
        sweeps += 1;
        trace!("Sweep {} finished with {} satisfied", sweeps, best);
    }

    debug!("Local search converged after {} sweeps at {} satisfied", sweeps, best);
    false
}
