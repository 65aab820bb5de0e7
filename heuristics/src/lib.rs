/// The CNF representation of parsed clause data and the DIMACS loader
pub mod cnf;
/// Errors raised while loading or building a formula
pub mod error;
/// The mutable formula every heuristic works on
pub mod formula;
/// Satisfaction checks for literals, clauses and whole formulae
mod evaluation;
/// Module that specifies the output of a heuristic
mod outcome;
/// Local search and metaheuristics one can choose from.
pub mod search;
mod util;

pub use cnf::{CNFClause, CNFVar, CNF};
pub use error::{FormatError, ParameterError};
pub use evaluation::check_valuation;
pub use formula::{Clause, Formula, Literal, VarId};
pub use outcome::{SearchOutcome, Valuation};
pub use search::{
    FrequencyGreedy, Heuristic, Interrupt, LocalSearch, Preference, SearchContext,
    SimulatedAnnealing, TabuSearch, TimedHeuristic,
};
