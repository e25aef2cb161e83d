#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while executing a program.
pub enum RuntimeError {
    /// Integer arithmetic overflowed.
    #[error("Error on line {line}, column {column}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// The symbol bound to a statement is not visible from the executing
    /// block, or cannot hold the computed value.
    #[error("Error on line {line}, column {column}: Invalid assignment to '{name}': {details}.")]
    InvalidAssignmentTarget {
        /// The name of the target variable.
        name:    String,
        /// Why the assignment was rejected.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A variable read refers to a symbol that is not visible from the
    /// executing block, or that holds a value of the wrong kind.
    #[error("Error on line {line}, column {column}: Invalid reference to '{name}': {details}.")]
    InvalidReference {
        /// The name of the variable.
        name:    String,
        /// Why the read was rejected.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A block refers to a symbol table that does not exist. Aborts
    /// execution.
    #[error("Error on line {line}, column {column}: Block has no symbol table.")]
    MissingBlock {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// Writing program output failed. Aborts execution.
    #[error("Error on line {line}, column {column}: Failed to write output: {message}.")]
    Output {
        /// The underlying I/O error message.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
}

impl RuntimeError {
    /// The source line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Overflow { line, .. }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::InvalidReference { line, .. }
            | Self::MissingBlock { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }

    /// The source column of the error.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Overflow { column, .. }
            | Self::InvalidAssignmentTarget { column, .. }
            | Self::InvalidReference { column, .. }
            | Self::MissingBlock { column, .. }
            | Self::Output { column, .. } => *column,
        }
    }

    /// Whether execution of the whole program has to stop.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingBlock { .. } | Self::Output { .. })
    }
}
