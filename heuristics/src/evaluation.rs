use crate::{Clause, Formula, Literal};

impl Literal {
    pub fn evaluate(&self, values: &[bool]) -> bool {
        values[self.var] == self.sign
    }
}

impl Clause {
    /// A clause holds iff at least one of its literals does.
    /// Stops at the first true literal.
    pub fn evaluate(&self, values: &[bool]) -> bool {
        self.literals().iter().any(|lit| lit.evaluate(values))
    }
}

impl Formula {
    /// Checks whether the current assignment satisfies every clause.
    /// Stops at the first false clause.
    pub fn evaluate(&self) -> bool {
        check_valuation(self, self.assignment())
    }

    /// Number of clauses satisfied by the current assignment. This is the
    /// objective all heuristics maximise, so every clause is evaluated.
    pub fn count_satisfied(&self) -> usize {
        let values = self.assignment();
        self.clauses().iter()
            .filter(|clause| clause.evaluate(values))
            .count()
    }
}

/// Checks an arbitrary valuation against the clauses of `formula`
/// without touching the formula's own assignment.
///
/// Panics if `val` does not hold exactly one value per variable.
pub fn check_valuation(formula: &Formula, val: &[bool]) -> bool {
    assert_eq!(val.len(), formula.num_variables(), "valuation length differs from variable count");
    formula.clauses().iter()
        .all(|clause| clause.evaluate(val))
}
