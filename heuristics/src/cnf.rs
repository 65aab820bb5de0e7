use itertools::Itertools;

use dimacs::parse_dimacs;
use crate::FormatError;

/// Type used for referencing logical variables in parsed input (1-based)
pub type CNFVarId = usize;

/// Parsed representation of a formula in CNF form
/// (conjunction of clauses), as handed over by the loader.
#[derive(Clone, Debug)]
pub struct CNF {
    /// Vector of inner clauses
    pub clauses : Vec<CNFClause>,
    /// Number of variables declared in the header
    pub num_variables: usize,
}

/// Representation of a clause (disjunction of variables)
#[derive(Clone, Debug)]
pub struct CNFClause {
    /// Vector of inner variables
    pub vars : Vec<CNFVar>
}

/// Occurrence of a logical variable
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CNFVar {
    /// Identifier of a variable
    pub id: CNFVarId,
    /// Variable is negated iff `sign == false`
    pub sign: bool,
}

impl CNF {
    /// Clause specifications as signed DIMACS literals
    pub fn specs(&self) -> impl Iterator<Item = Vec<i32>> + '_ {
        self.clauses.iter()
            .map(|clause| clause.vars.iter().map(CNFVar::to_i32).collect())
    }

    /// Prints formula in DIMACS compatible form
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_variables, self.clauses.len());
        for clause in &self.clauses {
            for var in &clause.vars {
                out.push_str(&var.to_i32().to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parse DIMACS string into CNF structure. A line starting with `%`
    /// ends the input, as found in the SATLIB benchmark files.
    pub fn from_dimacs(input : &str) -> Result<CNF, FormatError> {
        let mut input = input.lines()
            .take_while(|line| !line.trim_start().starts_with('%'))
            .join("\n");
        input.push('\n');

        match parse_dimacs(&input) {
            Ok(dimacs::Instance::Cnf{num_vars, clauses}) =>
                Ok(CNF {
                    num_variables: num_vars as usize,
                    clauses: clauses.iter()
                        .map(|clause| CNFClause {
                            vars: clause.lits().iter()
                                .map(|lit| {
                                    let id = lit.var().to_u64() as CNFVarId;
                                    match lit.sign() {
                                        dimacs::Sign::Pos => CNFVar::pos(id),
                                        dimacs::Sign::Neg => CNFVar::neg(id),
                                    }
                                }).collect()
                        }).collect(),
                }),
            Ok(_) => Err(FormatError::NotCnf),
            Err(err) => Err(FormatError::Parse(format!("{:?}", err))),
        }
    }
}

impl CNFVar {
    /// Creates a positive variable with given identifier
    pub fn pos(id: CNFVarId) -> CNFVar {
        CNFVar{id, sign: true}
    }

    /// Creates a negative variable with given identifier
    pub fn neg(id: CNFVarId) -> CNFVar{
        CNFVar{id, sign: false}
    }

    /// Converts to signed integer. The absolute value indicates
    /// the identifier and sign states for positivity.
    ///
    /// **NOTE** it is not integer-overflow friendly.
    pub fn to_i32(&self) -> i32 {
        if self.sign {
            self.id as i32
        } else {
            -(self.id as i32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UF_SNIPPET: &str = "c small instance\n\
                              c with a SATLIB style trailer\n\
                              p cnf 3 2\n\
                              1 -2 0\n\
                              2 3 -1 0\n\
                              %\n\
                              0\n";

    #[test]
    fn parses_clauses_and_header() {
        let cnf = CNF::from_dimacs(UF_SNIPPET).unwrap();
        assert_eq!(cnf.num_variables, 3);
        assert_eq!(cnf.clauses.len(), 2);
        assert_eq!(cnf.clauses[0].vars, vec![CNFVar::pos(1), CNFVar::neg(2)]);
        assert_eq!(cnf.clauses[1].vars, vec![CNFVar::pos(2), CNFVar::pos(3), CNFVar::neg(1)]);
    }

    #[test]
    fn specs_are_signed_literals() {
        let cnf = CNF::from_dimacs(UF_SNIPPET).unwrap();
        let specs: Vec<Vec<i32>> = cnf.specs().collect();
        assert_eq!(specs, vec![vec![1, -2], vec![2, 3, -1]]);
    }

    #[test]
    fn rejects_missing_header() {
        assert!(matches!(CNF::from_dimacs("1 -2 0\n"), Err(FormatError::Parse(_))));
    }

    #[test]
    fn dimacs_output_is_parseable_again() {
        let cnf = CNF::from_dimacs(UF_SNIPPET).unwrap();
        let again = CNF::from_dimacs(&cnf.to_dimacs()).unwrap();
        assert_eq!(again.num_variables, cnf.num_variables);
        assert_eq!(again.specs().collect::<Vec<_>>(), cnf.specs().collect::<Vec<_>>());
    }
}
