use tracing::{debug, warn};

use crate::{
    ast::Program,
    error::{Error, ParseError},
    interpreter::{
        cursor::TokenCursor,
        lexer::{Token, TokenKind, definition::Lexicon},
        scope::{ScopeId, Scopes},
    },
};

/// Result type used by the parser.
///
/// Every parsing routine returns either the node it built or the
/// `ParseError` that stopped it.
pub type ParseResult<T> = Result<T, ParseError>;

/// What parsing a program produced.
///
/// `program` is always usable: statements that failed to parse are left as
/// null statements. A program with a non-empty `errors` list must not be
/// executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// The tree and its symbol arena.
    pub program: Program,
    /// Every lexical and syntax error, in source order.
    pub errors:  Vec<Error>,
}

impl ParseOutcome {
    /// Returns `true` when the program parsed without errors.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Stores the state of a running parse.
///
/// The symbol arena is built alongside the tree: every block opens a table
/// whose parent is the table on top of `blocks`, and every variable reference
/// is resolved against that chain as soon as it is read.
pub struct Parser {
    /// Token source.
    pub(super) cursor: TokenCursor,
    /// Symbol arena under construction.
    pub(super) scopes: Scopes,
    /// Tables of the blocks currently open, innermost last.
    pub(super) blocks: Vec<ScopeId>,
    /// Errors recorded so far.
    pub(super) errors: Vec<ParseError>,
}

impl Parser {
    /// Creates a parser reading from `cursor`.
    #[must_use]
    pub fn new(cursor: TokenCursor) -> Self {
        Self { cursor,
               scopes: Scopes::new(),
               blocks: Vec::new(),
               errors: Vec::new() }
    }

    /// Parses the whole token stream.
    ///
    /// # Returns
    /// The program and every syntax error found along the way.
    #[must_use]
    pub fn parse_program(mut self) -> (Program, Vec<ParseError>) {
        let root = self.parse_root();
        (Program { root,
                   scopes: self.scopes },
         self.errors)
    }

    /// The table of the innermost open block.
    pub(super) fn current_scope(&self) -> ScopeId {
        self.blocks.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Skips the rest of a failed statement.
    ///
    /// Stops after the next newline, at end of input, or in front of a `}`
    /// that closes the current nested block.
    pub(super) fn resync(&mut self) {
        loop {
            match self.cursor.peek().kind {
                TokenKind::EndOfInput => return,
                TokenKind::RightBrace if self.blocks.len() > 1 => return,
                TokenKind::NewLine => {
                    self.cursor.pop();
                    return;
                },
                _ => {
                    self.cursor.pop();
                },
            }
        }
    }

    /// Builds an `ExpectedToken` error located at `found`.
    pub(super) fn expected(expected: impl Into<String>, found: &Token) -> ParseError {
        ParseError::ExpectedToken { expected: expected.into(),
                                    found:    found.describe(),
                                    line:     found.line,
                                    column:   found.column, }
    }
}

/// Parses a program given as source lines.
///
/// Lines are tokenized first. If any line fails to tokenize, the lexical
/// errors are returned with an empty program and parsing does not start.
///
/// # Parameters
/// - `lexicon`: The token definition table.
/// - `lines`: Source lines, without line terminators.
///
/// # Returns
/// A [`ParseOutcome`] holding the program and all errors.
///
/// # Example
/// ```
/// use kab::interpreter::{lexer::definition::Lexicon, parser::core::parse};
///
/// let outcome = parse(&Lexicon::new(), &["var x number = 2", "println x"]);
/// assert!(outcome.is_ok());
/// assert_eq!(outcome.program.root.statements.list.len(), 2);
///
/// let outcome = parse(&Lexicon::new(), &["println \"open"]);
/// assert_eq!(outcome.errors.len(), 1);
/// assert!(outcome.program.root.statements.list.is_empty());
/// ```
pub fn parse<S: AsRef<str>>(lexicon: &Lexicon, lines: &[S]) -> ParseOutcome {
    debug!(lines = lines.len(), "lexing program");
    let (cursor, lex_errors) = TokenCursor::from_lines(lexicon, lines);
    if !lex_errors.is_empty() {
        warn!(errors = lex_errors.len(), "lexing failed, program not parsed");
        return ParseOutcome { program: Program::empty(),
                              errors:  lex_errors.into_iter().map(Error::from).collect(), };
    }

    debug!("parsing program");
    let (program, errors) = Parser::new(cursor).parse_program();
    debug!(statements = program.root.statements.list.len(),
           errors = errors.len(),
           "parsed program");
    if !errors.is_empty() {
        warn!(errors = errors.len(), "program has syntax errors");
    }

    ParseOutcome { program,
                   errors: errors.into_iter().map(Error::from).collect() }
}
