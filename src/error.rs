/// Lexical errors.
///
/// Raised by the tokenizer when a line contains text that no token definition
/// recognizes, or a token (such as a string literal) that never terminates.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the AST: syntax
/// mistakes, unexpected tokens, and the semantic checks performed while
/// resolving scope (redeclaration, undeclared variables, kind mismatches).
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a parsed
/// program, such as integer overflow or an invalid assignment target.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error reported by the interpreter pipeline.
///
/// Lexical and parse errors are reported before execution starts; a program
/// with any of them is never executed. Runtime errors are collected while the
/// program runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A line could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The token stream is not a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A statement failed while executing.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The 1-based source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line(),
            Self::Parse(e) => e.line(),
            Self::Runtime(e) => e.line(),
        }
    }

    /// The 1-based source column the error refers to.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::Lex(e) => e.column(),
            Self::Parse(e) => e.column(),
            Self::Runtime(e) => e.column(),
        }
    }
}
