//! # kab
//!
//! kab is an interpreter for Kab, a small line-oriented scripting language
//! with typed variables, nested block scopes, arithmetic and string
//! concatenation.
//! It tokenizes, parses and executes programs, reporting every error with its
//! source line and column.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use tracing::debug;

use crate::{
    ast::Program,
    error::Error,
    interpreter::{
        executor::core::Executor,
        lexer::definition::Lexicon,
        parser::core::{ParseOutcome, parse as parse_with},
    },
};

/// Defines the structure of parsed programs.
///
/// This module declares the `Program`, `Block`, `Statement` and expression
/// types that represent the syntactic structure of a script as a tree. The
/// AST is built by the parser together with the symbol arena and walked by
/// the executor.
///
/// # Responsibilities
/// - Defines statement and expression types for all language constructs.
/// - Binds every variable reference to a symbol handle.
/// - Renders the tree for debugging.
pub mod ast;
/// Provides unified error types for lexing, parsing and execution.
///
/// This module defines all errors that can be raised while interpreting a
/// script. Every error carries the line and column it refers to and renders
/// as a single human readable message.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, executor).
/// - Attaches line and column numbers for context.
/// - Combines the phase errors into one `Error` type for callers.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, execution, value
/// representations and symbol storage.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, cursor, parser, executor.
/// - Provides entry points for each phase.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;

/// Splits source text into lines, trimming surrounding spaces.
///
/// # Example
/// ```
/// assert_eq!(kab::lines("  println 1  \n\tprint 2\n"), ["println 1", "print 2"]);
/// ```
#[must_use]
pub fn lines(source: &str) -> Vec<&str> {
    source.lines().map(str::trim).collect()
}

/// Parses source lines with the language's token table.
///
/// # Example
/// ```
/// let outcome = kab::parse(&["var x number", "y = 1"]);
///
/// assert_eq!(outcome.errors.len(), 1);
/// assert_eq!(outcome.errors[0].line(), 2);
/// ```
pub fn parse<S: AsRef<str>>(lines: &[S]) -> ParseOutcome {
    parse_with(&Lexicon::new(), lines)
}

/// Parses and runs a script, writing its output to `out`.
///
/// A script with lexical or syntax errors is not executed.
///
/// # Returns
/// The program with the final values of all symbols.
///
/// # Errors
/// Every lexical, syntax or runtime error found, in the order found.
///
/// # Examples
/// ```
/// let mut out = Vec::new();
/// let source = "var x number = 2\nvar y number = 3\nprintln x * y + 1";
///
/// assert!(kab::interpret(source, &mut out).is_ok());
/// assert_eq!(out, b"7\n");
///
/// // 'y' is never declared.
/// let mut out = Vec::new();
/// let errors = kab::interpret("y = 5", &mut out).unwrap_err();
///
/// assert_eq!(errors.len(), 1);
/// assert_eq!((errors[0].line(), errors[0].column()), (1, 1));
/// assert!(out.is_empty());
/// ```
pub fn interpret<W: Write>(source: &str, out: W) -> Result<Program, Vec<Error>> {
    let ParseOutcome { mut program, errors } = parse(&lines(source));
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut executor = Executor::new(out);
    executor.execute(&mut program);
    let errors = executor.into_errors();
    debug!(errors = errors.len(), "run finished");

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors.into_iter().map(Error::from).collect())
    }
}
