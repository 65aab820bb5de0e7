use auto_impl::auto_impl;
use rand::{rngs::StdRng, SeedableRng};

use super::Interrupt;
use crate::{Formula, SearchOutcome};

/// A search procedure that mutates the assignment of a formula in place
/// and reports the state it left the formula in.
#[auto_impl(&, Box)]
pub trait Heuristic {
    fn search(&self, formula: &mut Formula, context: &mut SearchContext) -> SearchOutcome;
}

/// Everything a search needs besides the formula: the source of random
/// choices and the external stop condition.
pub struct SearchContext {
    pub rng: StdRng,
    pub interrupt: Interrupt,
}

impl SearchContext {
    /// Reproducible context, the same seed yields the same random choices.
    pub fn seeded(seed: u64) -> SearchContext {
        SearchContext {
            rng: StdRng::seed_from_u64(seed),
            interrupt: Interrupt::never(),
        }
    }

    /// Context drawing its randomness from the operating system.
    pub fn unseeded() -> SearchContext {
        SearchContext {
            rng: StdRng::from_entropy(),
            interrupt: Interrupt::never(),
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> SearchContext {
        self.interrupt = interrupt;
        self
    }
}
