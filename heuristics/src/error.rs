use thiserror::Error;

/// Rejection of an input formula. Raised while loading or building a
/// [`Formula`](crate::Formula); no partial formula is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The DIMACS text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The instance is a valid DIMACS file but not in CNF.
    #[error("Only CNF formulae are supported")]
    NotCnf,

    /// A clause specification without any literal.
    #[error("Clause {clause} is empty")]
    EmptyClause { clause: usize },

    /// A literal referring to the variable `0`.
    #[error("Clause {clause} refers to variable 0")]
    ZeroVariable { clause: usize },

    /// A literal referring to a variable past the declared count.
    #[error("Clause {clause} refers to variable {variable}, but only {num_variables} are declared")]
    VariableOutOfRange {
        clause: usize,
        variable: usize,
        num_variables: usize,
    },
}

/// Rejection of heuristic parameters by the checked constructors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Cooling rate has to lie strictly between 0 and 1, got {0}")]
    CoolingRate(f64),

    #[error("Temperature has to be a positive finite number, got {0}")]
    Temperature(f64),
}
