use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{FormatError, Valuation, CNF};

/// Type used for referencing variables inside a [`Formula`] (0-based)
pub type VarId = usize;

/// Occurrence of a variable inside a clause. The literal is true
/// iff the variable currently holds the value `sign`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub var: VarId,
    pub sign: bool,
}

/// Disjunction of literals. The order of literals is kept as given,
/// so evaluation short-circuits the same way on every run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    literals: Vec<Literal>,
}

/// Conjunction of clauses together with the current truth assignment.
///
/// The formula is the only owner of the variable values. Clauses refer to
/// variables by index, so flipping a variable once is visible through every
/// clause that mentions it. Clauses never change after construction.
#[derive(Clone, Debug)]
pub struct Formula {
    values: Valuation,
    clauses: Vec<Clause>,
}

impl Literal {
    pub fn new(var: VarId, sign: bool) -> Literal {
        Literal { var, sign }
    }

    /// Converts back to the signed, 1-based DIMACS notation.
    pub fn to_i32(&self) -> i32 {
        let id = (self.var + 1) as i32;
        if self.sign { id } else { -id }
    }
}

impl Clause {
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

fn build_clauses<S, I>(num_variables: usize, specs: S) -> Result<Vec<Clause>, FormatError>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator<Item = i32>,
{
    specs.into_iter()
        .enumerate()
        .map(|(clause, spec)| {
            let literals = spec.into_iter()
                .map(|lit| {
                    let variable = (lit as i64).abs() as usize;
                    if variable == 0 {
                        Err(FormatError::ZeroVariable { clause })
                    } else if variable > num_variables {
                        Err(FormatError::VariableOutOfRange { clause, variable, num_variables })
                    } else {
                        Ok(Literal::new(variable - 1, lit > 0))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            if literals.is_empty() {
                return Err(FormatError::EmptyClause { clause });
            }
            Ok(Clause { literals })
        })
        .collect()
}

impl Formula {
    /// Builds a formula over `num_variables` variables out of clause
    /// specifications in signed DIMACS notation (without the trailing `0`).
    /// Every variable starts with a value drawn from `rng`.
    pub fn new<R, S, I>(num_variables: usize, specs: S, rng: &mut R) -> Result<Formula, FormatError>
    where
        R: Rng + ?Sized,
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = i32>,
    {
        let clauses = build_clauses(num_variables, specs)?;
        let values = (0..num_variables).map(|_| rng.gen::<bool>()).collect();
        debug!("Built formula with {} variables and {} clauses", num_variables, clauses.len());
        Ok(Formula { values, clauses })
    }

    /// Builds a formula with a fixed starting assignment. The number of
    /// variables is the length of `values`.
    pub fn with_assignment<S, I>(values: Valuation, specs: S) -> Result<Formula, FormatError>
    where
        S: IntoIterator<Item = I>,
        I: IntoIterator<Item = i32>,
    {
        let clauses = build_clauses(values.len(), specs)?;
        Ok(Formula { values, clauses })
    }

    pub fn from_cnf<R: Rng + ?Sized>(cnf: &CNF, rng: &mut R) -> Result<Formula, FormatError> {
        Formula::new(cnf.num_variables, cnf.specs(), rng)
    }

    /// Reproducible construction: the same seed yields the same initial assignment.
    pub fn from_cnf_seeded(cnf: &CNF, seed: u64) -> Result<Formula, FormatError> {
        Formula::from_cnf(cnf, &mut StdRng::seed_from_u64(seed))
    }

    pub fn from_cnf_unseeded(cnf: &CNF) -> Result<Formula, FormatError> {
        Formula::from_cnf(cnf, &mut StdRng::from_entropy())
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Panics if `var` is not below [`num_variables`](Formula::num_variables).
    pub fn value(&self, var: VarId) -> bool {
        self.values[var]
    }

    /// Current values of all variables, indexed by [`VarId`]
    pub fn assignment(&self) -> &[bool] {
        &self.values
    }

    /// Panics if `var` is not below [`num_variables`](Formula::num_variables).
    pub fn flip(&mut self, var: VarId) {
        self.values[var] = !self.values[var];
    }

    /// Panics if `var` is not below [`num_variables`](Formula::num_variables).
    pub fn set(&mut self, var: VarId, value: bool) {
        self.values[var] = value;
    }

    /// Copies the current assignment.
    pub fn snapshot(&self) -> Valuation {
        self.values.clone()
    }

    /// Overwrites the current assignment with a snapshot.
    ///
    /// Panics if the snapshot was taken from a formula with a different
    /// number of variables.
    pub fn restore(&mut self, snapshot: &[bool]) {
        self.values.copy_from_slice(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_share_variables() {
        let mut formula = Formula::with_assignment(vec![true, false], vec![vec![1, 2], vec![-1]]).unwrap();
        assert_eq!(formula.clauses()[0].literals()[0], Literal::new(0, true));
        assert_eq!(formula.clauses()[1].literals()[0], Literal::new(0, false));

        formula.flip(0);
        assert!(!formula.value(0));
        assert_eq!(formula.assignment(), &[false, false]);
    }

    #[test]
    fn rejects_zero_variable() {
        let res = Formula::with_assignment(vec![true; 2], vec![vec![1, 0]]);
        assert_eq!(res.unwrap_err(), FormatError::ZeroVariable { clause: 0 });
    }

    #[test]
    fn rejects_out_of_range_variable() {
        let res = Formula::with_assignment(vec![true; 2], vec![vec![1], vec![-3, 2]]);
        assert_eq!(res.unwrap_err(), FormatError::VariableOutOfRange { clause: 1, variable: 3, num_variables: 2 });
    }

    #[test]
    fn rejects_empty_clause() {
        let res = Formula::with_assignment(vec![true; 2], vec![vec![1], vec![]]);
        assert_eq!(res.unwrap_err(), FormatError::EmptyClause { clause: 1 });
    }

    #[test]
    fn same_seed_same_assignment() {
        let cnf = CNF::from_dimacs("p cnf 40 1\n1 2 3 0\n").unwrap();
        let a = Formula::from_cnf_seeded(&cnf, 7).unwrap();
        let b = Formula::from_cnf_seeded(&cnf, 7).unwrap();
        assert_eq!(a.assignment(), b.assignment());
        assert_eq!(a.num_variables(), 40);
    }

    #[test]
    fn snapshot_restores_values() {
        let mut formula = Formula::with_assignment(vec![true, true, false], vec![vec![1, -3]]).unwrap();
        let snapshot = formula.snapshot();
        formula.flip(0);
        formula.set(2, true);
        formula.restore(&snapshot);
        assert_eq!(formula.assignment(), &[true, true, false]);
    }

    #[test]
    #[should_panic]
    fn flipping_unknown_variable_panics() {
        let mut formula = Formula::with_assignment(vec![true], vec![vec![1]]).unwrap();
        formula.flip(1);
    }

    #[test]
    fn literal_to_dimacs() {
        assert_eq!(Literal::new(0, true).to_i32(), 1);
        assert_eq!(Literal::new(4, false).to_i32(), -5);
    }
}
