//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Formula tokenization or parse error
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Variable did not resolve to a value
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    /// Unknown function name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Cell id not present in the namespace
    #[error("Unknown cell: {0}")]
    UnknownCell(String),

    /// Element-wise arithmetic over sample vectors of incompatible lengths
    #[error("Mismatched sample lengths: {left} and {right}")]
    MismatchedLengths { left: usize, right: usize },

    /// Circular cell reference
    #[error("Cycle detected at cell {0}")]
    CycleDetected(String),

    /// Invalid distribution parameter
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Failure inside a function call, wrapped with the function name
    #[error("Error in function {name}: {source}")]
    Function {
        name: String,
        #[source]
        source: Box<FormulaError>,
    },

    /// Generic evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(String),
}

impl FormulaError {
    /// Wrap an error that occurred inside the named function.
    pub fn in_function(name: &str, source: FormulaError) -> Self {
        FormulaError::Function {
            name: name.to_string(),
            source: Box::new(source),
        }
    }
}
