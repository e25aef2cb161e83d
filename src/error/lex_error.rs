#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while tokenizing a line.
pub enum LexError {
    /// No token definition accepts the text at this position.
    #[error("Error on line {line}, column {column}: Unrecognized token '{text}'.")]
    Unrecognized {
        /// The text that could not be matched.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The column where the unmatched text starts.
        column: usize,
    },
    /// The line ended while a token was still incomplete.
    #[error("Error on line {line}, column {column}: Unterminated token '{text}'.")]
    Unterminated {
        /// The incomplete token text.
        text:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The column where the incomplete token starts.
        column: usize,
    },
}

impl LexError {
    /// The source line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Unrecognized { line, .. } | Self::Unterminated { line, .. } => *line,
        }
    }

    /// The source column of the error.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Unrecognized { column, .. } | Self::Unterminated { column, .. } => *column,
        }
    }
}
