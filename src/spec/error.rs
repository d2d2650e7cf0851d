use std::fmt;

/// Argument schema construction error
///
/// Returned when registration metadata is malformed. These are programming
/// errors in the method declarations, so they surface when a spec is built,
/// never while a request is being coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    /// Argument declared without a name
    EmptyArgumentName {
        /// Method the argument belongs to, when known
        method: Option<String>,
    },
    /// Array item delimiter is not exactly one character
    InvalidDelimiter {
        /// Argument carrying the delimiter
        argument: String,
        /// The offending delimiter string
        delimiter: String,
    },
    /// Two arguments of one method share a name
    DuplicateArgument {
        method: String,
        argument: String,
    },
    /// Method declared without a name
    EmptyMethodName,
    /// Two methods registered under one name
    DuplicateMethod {
        method: String,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecError::EmptyArgumentName { method: Some(method) } => {
                write!(f, "argument schema error: method '{}' declares an argument without a name", method)
            }
            SpecError::EmptyArgumentName { method: None } => {
                write!(f, "argument schema error: argument declared without a name")
            }
            SpecError::InvalidDelimiter { argument, delimiter } => {
                write!(
                    f,
                    "argument schema error: delimiter {:?} of argument '{}' must be exactly one character",
                    delimiter, argument
                )
            }
            SpecError::DuplicateArgument { method, argument } => {
                write!(
                    f,
                    "argument schema error: method '{}' declares argument '{}' more than once",
                    method, argument
                )
            }
            SpecError::EmptyMethodName => {
                write!(f, "argument schema error: method declared without a name")
            }
            SpecError::DuplicateMethod { method } => {
                write!(f, "argument schema error: method '{}' is registered more than once", method)
            }
        }
    }
}

impl std::error::Error for SpecError {}
