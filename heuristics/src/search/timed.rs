use std::time::{Duration, Instant};

use super::{Heuristic, SearchContext};
use crate::{Formula, SearchOutcome};

/// A wrapper for another heuristic which exposes time performance
/// measurement
pub struct TimedHeuristic<H> {
    heuristic: H,
}

impl<H: Heuristic> Heuristic for TimedHeuristic<H> {
    fn search(&self, formula: &mut Formula, context: &mut SearchContext) -> SearchOutcome {
        self.heuristic.search(formula, context)
    }
}

impl<H> TimedHeuristic<H> {
    pub fn new(heuristic: H) -> Self {
        TimedHeuristic{heuristic}
    }
}

impl<H: Heuristic> TimedHeuristic<H> {
    /// Runs the wrapped heuristic but measures time additionally
    pub fn search_timed(&self, formula: &mut Formula, context: &mut SearchContext) -> (Duration, SearchOutcome) {
        let start = Instant::now();
        let outcome = self.heuristic.search(formula, context);
        let duration = start.elapsed();
        (duration, outcome)
    }
}
