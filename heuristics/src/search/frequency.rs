use tracing::{debug, trace};

use super::{Heuristic, Interrupt, SearchContext};
use crate::util::HashSet;
use crate::{Formula, SearchOutcome, VarId};

/// Direction of [`FrequencyGreedy`].
///
/// The same preference ranks the candidates (occurrence counts) and decides
/// whether a move is kept (satisfied-clause counts), so both uses always
/// point the same way. With `PreferMin` the search therefore drives the
/// number of satisfied clauses down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preference {
    PreferMax,
    PreferMin,
}

impl Preference {
    /// `a` is strictly preferred over `b`.
    pub fn prefers(self, a: usize, b: usize) -> bool {
        match self {
            Preference::PreferMax => a > b,
            Preference::PreferMin => a < b,
        }
    }
}

impl Default for Preference {
    fn default() -> Self {
        Preference::PreferMax
    }
}

/// Greedy commitment to the variable and polarity occurring in the most
/// (or fewest) clauses.
///
/// Occurrences are collected once on entry and never refreshed, so later
/// rankings may be based on stale counts. Each round ranks every occurring
/// variable again and commits the winner; the search stops as soon as a
/// commitment does not improve the objective (that move is undone) or
/// every clause is satisfied. Since the counts never change, the second
/// round picks the same variable again and the search ends there.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrequencyGreedy {
    pub preference: Preference,
}

impl FrequencyGreedy {
    pub fn new(preference: Preference) -> FrequencyGreedy {
        FrequencyGreedy { preference }
    }
}

impl Heuristic for FrequencyGreedy {
    fn search(&self, formula: &mut Formula, context: &mut SearchContext) -> SearchOutcome {
        let interrupted = commit_greedily(formula, self.preference, &context.interrupt);
        SearchOutcome::of(formula).interrupted(interrupted)
    }
}

impl Formula {
    /// Runs [`FrequencyGreedy`] and returns the number of satisfied clauses.
    pub fn frequency_based(&mut self, preference: Preference) -> usize {
        commit_greedily(self, preference, &Interrupt::never());
        self.count_satisfied()
    }
}

/// Clauses a variable occurs in, split by polarity.
#[derive(Clone, Debug, Default)]
struct Presence {
    pos: HashSet<usize>,
    neg: HashSet<usize>,
}

impl Presence {
    fn occurs(&self) -> bool {
        !self.pos.is_empty() || !self.neg.is_empty()
    }
}

/// Occurrence sets of every variable plus the satisfaction flag of every
/// clause under the current assignment.
fn presence_maps(formula: &Formula) -> (Vec<Presence>, Vec<bool>) {
    let mut presence = vec![Presence::default(); formula.num_variables()];
    let mut satisfied = vec![false; formula.num_clauses()];

    for (index, clause) in formula.clauses().iter().enumerate() {
        for lit in clause.literals() {
            if lit.sign {
                presence[lit.var].pos.insert(index);
            } else {
                presence[lit.var].neg.insert(index);
            }
            if lit.evaluate(formula.assignment()) {
                satisfied[index] = true;
            }
        }
    }
    (presence, satisfied)
}

struct Candidate {
    var: VarId,
    value: bool,
    count: usize,
}

/// Most preferred variable and polarity. A polarity is only
/// eligible if it is strictly preferred over the opposite one, and the
/// first candidate found wins ties.
fn pick_candidate(presence: &[Presence], preference: Preference) -> Option<Candidate> {
    let mut chosen: Option<Candidate> = None;

    for (var, occurrences) in presence.iter().enumerate() {
        if !occurrences.occurs() {
            continue;
        }
        let (t, f) = (occurrences.pos.len(), occurrences.neg.len());
        let beats = |count: usize, chosen: &Option<Candidate>| {
            chosen.as_ref().map_or(true, |c| preference.prefers(count, c.count))
        };

        if preference.prefers(f, t) && beats(f, &chosen) {
            chosen = Some(Candidate { var, value: false, count: f });
        } else if preference.prefers(t, f) && beats(t, &chosen) {
            chosen = Some(Candidate { var, value: true, count: t });
        }
    }
    chosen
}

/// Returns whether the search was interrupted.
fn commit_greedily(formula: &mut Formula, preference: Preference, interrupt: &Interrupt) -> bool {
    let (presence, satisfied) = presence_maps(formula);
    debug!("Frequency search starts with {} of {} clauses satisfied",
        satisfied.iter().filter(|s| **s).count(), formula.num_clauses());

    let mut best = formula.count_satisfied();

    loop {
        if interrupt.is_raised() {
            debug!("Frequency search interrupted at {} satisfied", best);
            return true;
        }
        let candidate = match pick_candidate(&presence, preference) {
            Some(candidate) => candidate,
            None => break,
        };

        let previous = formula.value(candidate.var);
        formula.set(candidate.var, candidate.value);
        let current = formula.count_satisfied();
        trace!("Committed variable {} to {} ({} occurrences): {} satisfied",
            candidate.var + 1, candidate.value, candidate.count, current);

        if preference.prefers(current, best) {
            best = current;
        } else {
            formula.set(candidate.var, previous);
            break;
        }
        if best == formula.num_clauses() {
            break;
        }
    }

    debug!("Frequency search finished at {} satisfied", best);
    false
}
