use tracing::trace;

use crate::{
    ast::{Block, Statement, Statements},
    error::ParseError,
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

impl Parser {
    /// Parses the top-level statement list into the root block.
    ///
    /// The root block opens the first table of the arena and ends at end of
    /// input. A `}` at this level has no matching `{` and is reported.
    pub(super) fn parse_root(&mut self) -> Block {
        let scope = self.scopes.open(None);
        self.blocks.push(scope);
        let statements = self.parse_statements(false);
        self.blocks.pop();

        Block { statements,
                scope,
                line: 1,
                column: 1 }
    }

    /// Parses a nested block.
    ///
    /// Grammar: `block := "{" statement* "}"`
    ///
    /// # Parameters
    /// - `line`, `column`: Position of the opening brace, which has already
    ///   been consumed.
    ///
    /// # Returns
    /// The block, consumed up to and including its closing brace.
    pub(super) fn parse_block(&mut self, line: usize, column: usize) -> Block {
        let parent = self.current_scope();
        let scope = self.scopes.open(Some(parent));
        trace!(line, column, depth = self.blocks.len(), "entering block");
        self.blocks.push(scope);
        let statements = self.parse_statements(true);
        self.blocks.pop();
        trace!(line, column, "leaving block");

        Block { statements,
                scope,
                line,
                column }
    }

    /// Parses statements until the end of the current block.
    ///
    /// A statement that fails is recorded, replaced by a null statement, and
    /// parsing resumes on the next line. A malformed declaration instead
    /// abandons the rest of the block.
    fn parse_statements(&mut self, nested: bool) -> Statements {
        let mut list = Vec::new();

        loop {
            let token = self.cursor.peek().clone();
            match token.kind {
                TokenKind::NewLine | TokenKind::Hash => {
                    self.cursor.pop();
                },
                TokenKind::EndOfInput => {
                    if nested {
                        self.errors
                            .push(ParseError::MissingClosingBrace { line:   token.line,
                                                                    column: token.column, });
                    }
                    break;
                },
                TokenKind::RightBrace if nested => {
                    self.cursor.pop();
                    break;
                },
                TokenKind::RightBrace => {
                    self.cursor.pop();
                    self.errors
                        .push(ParseError::UnmatchedClosingBrace { line:   token.line,
                                                                  column: token.column, });
                },
                _ => match self.parse_statement() {
                    Ok(statement) => list.push(statement),
                    Err(e) => {
                        let aborts = e.aborts_block();
                        trace!(error = %e, "statement failed");
                        self.errors.push(e);
                        list.push(Statement::Null);
                        if aborts {
                            self.skip_block(nested);
                            break;
                        }
                        self.resync();
                    },
                },
            }
        }

        Statements { list }
    }

    /// Skips to the end of the current block after a malformed declaration.
    ///
    /// In a nested block this consumes everything up to and including the
    /// matching `}`, counting the braces of inner blocks on the way. At the
    /// top level it consumes the rest of the input.
    fn skip_block(&mut self, nested: bool) {
        let mut depth = 0usize;

        loop {
            let token = self.cursor.pop();
            match token.kind {
                TokenKind::EndOfInput => {
                    if nested {
                        self.errors
                            .push(ParseError::MissingClosingBrace { line:   token.line,
                                                                    column: token.column, });
                    }
                    return;
                },
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace if nested && depth == 0 => return,
                TokenKind::RightBrace => depth = depth.saturating_sub(1),
                _ => {},
            }
        }
    }
}
