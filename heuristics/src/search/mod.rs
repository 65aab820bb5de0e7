mod heuristic;
mod interrupt;
mod local_search;
mod frequency;
mod tabu;
mod annealing;
mod timed;

pub use heuristic::{Heuristic, SearchContext};
pub use interrupt::Interrupt;
pub use local_search::LocalSearch;
pub use frequency::{FrequencyGreedy, Preference};
pub use tabu::TabuSearch;
pub use annealing::SimulatedAnnealing;
pub use timed::TimedHeuristic;
