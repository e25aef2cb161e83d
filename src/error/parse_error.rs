use crate::interpreter::value::DataKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while parsing a token stream.
pub enum ParseError {
    /// Found a token that cannot start or continue the current construct.
    #[error("Error on line {line}, column {column}: Unexpected token '{found}'.")]
    UnexpectedToken {
        /// The token text encountered.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A specific token was required but something else was found.
    #[error("Error on line {line}, column {column}: Expected {expected}, found '{found}'.")]
    ExpectedToken {
        /// Description of what was expected.
        expected: String,
        /// The token text encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// The input ended inside a block.
    #[error("Error on line {line}, column {column}: Expected closing brace '}}' but none found.")]
    MissingClosingBrace {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A `}` appeared outside of any block.
    #[error("Error on line {line}, column {column}: Closing brace '}}' has no matching '{{'.")]
    UnmatchedClosingBrace {
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error on line {line}, column {column}: Expected closing parenthesis ')', found '{found}'.")]
    ExpectedClosingParen {
        /// The token text encountered instead.
        found:  String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A `var` statement is missing its name or type. Aborts the enclosing
    /// block.
    #[error("Error on line {line}, column {column}: Malformed declaration: {details}.")]
    MalformedDeclaration {
        /// What is wrong with the declaration.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
    /// A name was declared twice in the same block.
    #[error("Error on line {line}, column {column}: Variable '{name}' is already declared in this block.")]
    Redeclaration {
        /// The name of the variable.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// A name was used without a visible declaration.
    #[error("Error on line {line}, column {column}: Undeclared variable '{name}'.")]
    UndeclaredVariable {
        /// The name of the variable.
        name:   String,
        /// The source line where the error occurred.
        line:   usize,
        /// The source column where the error occurred.
        column: usize,
    },
    /// An expression or variable has the wrong data kind for its position.
    #[error("Error on line {line}, column {column}: Expected a {expected} value, but '{found}' is a {actual}.")]
    KindMismatch {
        /// The data kind required here.
        expected: DataKind,
        /// The data kind that was supplied.
        actual:   DataKind,
        /// The offending token text.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
        /// The source column where the error occurred.
        column:   usize,
    },
    /// An integer literal does not fit into 64 bits.
    #[error("Error on line {line}, column {column}: Literal '{literal}' is too large.")]
    LiteralTooLarge {
        /// The literal text.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
        /// The source column where the error occurred.
        column:  usize,
    },
}

impl ParseError {
    /// The source line of the error.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::ExpectedToken { line, .. }
            | Self::MissingClosingBrace { line, .. }
            | Self::UnmatchedClosingBrace { line, .. }
            | Self::ExpectedClosingParen { line, .. }
            | Self::MalformedDeclaration { line, .. }
            | Self::Redeclaration { line, .. }
            | Self::UndeclaredVariable { line, .. }
            | Self::KindMismatch { line, .. }
            | Self::LiteralTooLarge { line, .. } => *line,
        }
    }

    /// The source column of the error.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::UnexpectedToken { column, .. }
            | Self::ExpectedToken { column, .. }
            | Self::MissingClosingBrace { column, .. }
            | Self::UnmatchedClosingBrace { column, .. }
            | Self::ExpectedClosingParen { column, .. }
            | Self::MalformedDeclaration { column, .. }
            | Self::Redeclaration { column, .. }
            | Self::UndeclaredVariable { column, .. }
            | Self::KindMismatch { column, .. }
            | Self::LiteralTooLarge { column, .. } => *column,
        }
    }

    /// Whether this error stops parsing of the block it occurred in.
    ///
    /// Every other error is recorded and parsing resumes at the next
    /// statement.
    #[must_use]
    pub const fn aborts_block(&self) -> bool {
        matches!(self, Self::MalformedDeclaration { .. })
    }
}
