use tracing::{debug, trace};

use super::{Heuristic, Interrupt, SearchContext};
use crate::{Formula, SearchOutcome, VarId};

/// Tabu search over single variable flips with an aspiration criterion.
///
/// Every iteration scores the whole 1-flip neighbourhood and moves to the
/// best neighbour whose variable is not tabu, even if that worsens the
/// current assignment. A flipped variable stays tabu for `tenure`
/// iterations. A tabu move is still taken if it beats both the best free
/// move and the best assignment seen so far. The search gives up after
/// `max_stall` consecutive iterations without a new best and leaves the
/// formula in the best assignment found.
#[derive(Clone, Copy, Debug)]
pub struct TabuSearch {
    pub tenure: usize,
    pub max_stall: usize,
}

impl TabuSearch {
    pub fn new(tenure: usize, max_stall: usize) -> TabuSearch {
        TabuSearch { tenure, max_stall }
    }
}

impl Default for TabuSearch {
    fn default() -> Self {
        TabuSearch::new(60, 20)
    }
}

impl Heuristic for TabuSearch {
    fn search(&self, formula: &mut Formula, context: &mut SearchContext) -> SearchOutcome {
        let interrupted = tabu(formula, self.tenure, self.max_stall, &context.interrupt);
        SearchOutcome::of(formula).interrupted(interrupted)
    }
}

impl Formula {
    /// Runs [`TabuSearch`] and returns the number of satisfied clauses.
    pub fn tabu_search(&mut self, tenure: usize, max_stall: usize) -> usize {
        tabu(self, tenure, max_stall, &Interrupt::never());
        self.count_satisfied()
    }
}

#[derive(Clone, Copy)]
struct Move {
    var: VarId,
    score: usize,
}

fn keep_better(best: &mut Option<Move>, candidate: Move) {
    if best.map_or(true, |m| candidate.score > m.score) {
        *best = Some(candidate);
    }
}

/// Returns whether the search was interrupted.
fn tabu(formula: &mut Formula, tenure: usize, max_stall: usize, interrupt: &Interrupt) -> bool {
    let mut restricted = vec![0usize; formula.num_variables()];
    let mut best = formula.count_satisfied();
    let mut best_values = formula.snapshot();
    let mut stall = max_stall;
    let mut iterations = 0;
    let mut interrupted = false;

    while stall > 0 {
        if interrupt.is_raised() {
            interrupted = true;
            break;
        }
        trace!("Tabu iteration {}: best {}", iterations, best);

        let mut free: Option<Move> = None;
        let mut forbidden: Option<Move> = None;

        for var in 0..formula.num_variables() {
            formula.flip(var);
            let score = formula.count_satisfied();
            formula.flip(var);

            if restricted[var] == 0 {
                keep_better(&mut free, Move { var, score });
            } else {
                keep_better(&mut forbidden, Move { var, score });
                restricted[var] -= 1;
            }
        }

        let aspiration = forbidden.filter(|m| {
            m.score > best && free.map_or(true, |f| m.score > f.score)
        });
        let improved = match aspiration.or(free) {
            Some(m) => {
                formula.flip(m.var);
                restricted[m.var] = tenure;
                if m.score > best {
                    best = m.score;
                    true
                } else {
                    false
                }
            }
            None => false,
        };

        if improved {
            best_values.copy_from_slice(formula.assignment());
            stall = max_stall;
        } else {
            stall -= 1;
        }
        iterations += 1;
    }

    formula.restore(&best_values);
    debug!("Tabu search stopped after {} iterations at {} satisfied", iterations, best);
    interrupted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_satisfying_assignment() {
        let mut formula = Formula::with_assignment(vec![true, true], vec![vec![1, 2], vec![-1, -2]]).unwrap();
        assert_eq!(formula.tabu_search(1, 5), 2);
        assert!(formula.evaluate());
    }

    #[test]
    fn restores_best_after_worsening_moves() {
        // Already optimal; every move worsens, the best snapshot is restored
        let mut formula = Formula::with_assignment(vec![true, false], vec![vec![1], vec![-2], vec![1, 2]]).unwrap();
        assert_eq!(formula.tabu_search(1, 4), 3);
        assert_eq!(formula.assignment(), &[true, false]);
    }

    #[test]
    fn zero_stall_leaves_formula_untouched() {
        let mut formula = Formula::with_assignment(vec![false], vec![vec![1]]).unwrap();
        assert_eq!(formula.tabu_search(3, 0), 0);
        assert_eq!(formula.assignment(), &[false]);
    }

    #[test]
    fn no_variables() {
        let mut formula = Formula::with_assignment(vec![], Vec::<Vec<i32>>::new()).unwrap();
        assert_eq!(formula.tabu_search(2, 3), 0);
    }

    #[test]
    fn escapes_local_optimum() {
        // (x1) ^ (x2) ^ (-x1 v -x2 v x3) ^ (-x3 v x1)
        // from (F, F, F) two of four hold; greedy flips stall at three
        let specs = vec![vec![1], vec![2], vec![-1, -2, 3], vec![-3, 1]];
        let mut formula = Formula::with_assignment(vec![false, false, false], specs).unwrap();
        assert_eq!(formula.tabu_search(2, 10), 4);
        assert_eq!(formula.assignment(), &[true, true, true]);
    }
}
