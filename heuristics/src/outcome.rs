use std::fmt::Write as FmtWrite;

use crate::Formula;

pub type Valuation = Vec<bool>;

const MAX_LITERALS_PER_LINE: usize = 8;

/// Final state of a search: the assignment the formula was left with
/// and how many clauses it satisfies.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub valuation: Valuation,
    pub satisfied: usize,
    pub num_clauses: usize,
    /// The search was stopped by an [`Interrupt`](crate::Interrupt)
    /// before meeting its own termination criterion.
    pub interrupted: bool,
}

impl SearchOutcome {
    /// Reads the current state of `formula`.
    pub fn of(formula: &Formula) -> SearchOutcome {
        SearchOutcome {
            valuation: formula.snapshot(),
            satisfied: formula.count_satisfied(),
            num_clauses: formula.num_clauses(),
            interrupted: false,
        }
    }

    pub fn interrupted(mut self, interrupted: bool) -> SearchOutcome {
        self.interrupted = interrupted;
        self
    }

    pub fn is_sat(&self) -> bool {
        self.satisfied == self.num_clauses
    }

    pub fn unsatisfied(&self) -> usize {
        self.num_clauses - self.satisfied
    }

    fn literal_lines(&self, prefix: &str, terminator: &str) -> String {
        let mut out = String::new();
        let mut iter = self.valuation.iter().enumerate().peekable();

        while iter.peek().is_some() {
            out.push_str(prefix);
            for (id, sign) in iter.by_ref().take(MAX_LITERALS_PER_LINE) {
                // Writing into a String cannot fail
                let _ = write!(&mut out, "{}{} ", if *sign { " " } else { "-" }, id + 1);
            }
            out.push_str(terminator);
            out.push('\n');
        }
        out
    }

    /// Output in the style of the MaxSAT evaluations: cost line, status
    /// line and the assignment in `v` lines.
    pub fn to_dimacs(&self) -> String {
        format!("o {}\ns {}\n{}",
            self.unsatisfied(),
            if self.is_sat() { "SATISFIABLE" } else { "UNKNOWN" },
            if self.valuation.is_empty() {
                "v 0\n".to_string()
            } else {
                self.literal_lines("v ", "0")
            })
    }
}

impl std::fmt::Debug for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.to_dimacs())
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} of {} clauses{}):\n{}",
            if self.is_sat() { "Satisfiable" } else { "Unknown" },
            self.satisfied,
            self.num_clauses,
            if self.interrupted { ", interrupted" } else { "" },
            self.literal_lines("", ""))
    }
}
