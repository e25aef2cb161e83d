use tracing::trace;

use crate::{
    ast::{Expression, Statement},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
        scope::{Symbol, SymbolId},
        value::DataKind,
    },
};

impl Parser {
    /// Parses one statement, including its terminator.
    ///
    /// Grammar:
    /// ```text
    /// statement := "var" name type ["=" expression]
    ///            | name ("=" | "+=") expression
    ///            | ("print" | "println") [expression]
    ///            | block
    /// ```
    /// A statement ends at a newline, at end of input, in front of a `}` or in
    /// front of a `#` comment.
    ///
    /// # Errors
    /// Returns the first error found in the statement.
    pub(super) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.cursor.pop();
        trace!(line = token.line, column = token.column, kind = %token.kind, "statement");

        let statement = match token.kind {
            TokenKind::Var => self.parse_var(&token)?,
            TokenKind::Identifier => self.parse_assign(&token)?,
            TokenKind::Print | TokenKind::Println => self.parse_print(&token)?,
            TokenKind::LeftBrace => Statement::Block(self.parse_block(token.line, token.column)),
            _ => {
                self.cursor.pushback();
                return Err(ParseError::UnexpectedToken { found:  token.describe(),
                                                         line:   token.line,
                                                         column: token.column, });
            },
        };

        self.end_statement()?;
        Ok(statement)
    }

    /// Checks that the current statement is complete.
    fn end_statement(&mut self) -> ParseResult<()> {
        let token = self.cursor.peek().clone();
        match token.kind {
            TokenKind::NewLine => {
                self.cursor.pop();
                Ok(())
            },
            TokenKind::EndOfInput | TokenKind::RightBrace | TokenKind::Hash => Ok(()),
            _ => Err(Self::expected("end of statement", &token)),
        }
    }

    /// Parses `var <name> <string|number> [= <expression>]`.
    ///
    /// The initializer is parsed before the new symbol is added, so a
    /// reference to the same name inside it resolves to an outer declaration.
    /// The symbol is added even when the initializer fails.
    ///
    /// # Errors
    /// - `MalformedDeclaration` if the name or the type is missing.
    /// - `Redeclaration` if the name is already declared in this block.
    /// - Anything the initializer reports.
    fn parse_var(&mut self, keyword: &Token) -> ParseResult<Statement> {
        let name = self.cursor.peek().clone();
        if name.kind != TokenKind::Identifier {
            return Err(ParseError::MalformedDeclaration { details: format!("expected a variable name, found '{}'",
                                                                           name.describe()),
                                                          line:    name.line,
                                                          column:  name.column, });
        }
        self.cursor.pop();

        let type_token = self.cursor.peek().clone();
        let kind = match type_token.kind {
            TokenKind::NumberType => DataKind::Numeric,
            TokenKind::StringType => DataKind::Textual,
            _ => {
                return Err(ParseError::MalformedDeclaration { details: format!("expected 'number' or 'string' after '{}', found '{}'",
                                                                               name.literal,
                                                                               type_token.describe()),
                                                              line:    type_token.line,
                                                              column:  type_token.column, });
            },
        };
        self.cursor.pop();

        let scope = self.current_scope();
        if self.scopes.get_local(scope, &name.literal).is_some() {
            return Err(ParseError::Redeclaration { name:   name.literal,
                                                   line:   name.line,
                                                   column: name.column, });
        }

        let initializer = if self.cursor.swallow(TokenKind::Equals) {
            Some(self.parse_expression(kind))
        } else {
            None
        };

        let symbol = self.scopes.add(scope, Symbol::new(&name.literal, kind));
        let initializer = initializer.transpose()?;

        Ok(Statement::Var { symbol,
                            name: name.literal,
                            kind,
                            initializer,
                            line: keyword.line,
                            column: keyword.column })
    }

    /// Parses `<name> = <expression>` and `<name> += <expression>`.
    ///
    /// The target must already be declared in the current block or an
    /// enclosing one, and the expression must have the target's kind.
    fn parse_assign(&mut self, target: &Token) -> ParseResult<Statement> {
        let Some(symbol) = self.scopes.get(self.current_scope(), &target.literal) else {
            return Err(ParseError::UndeclaredVariable { name:   target.literal.clone(),
                                                        line:   target.line,
                                                        column: target.column, });
        };

        let operator = self.cursor.peek().clone();
        let compound = match operator.kind {
            TokenKind::Equals => false,
            TokenKind::PlusEquals => true,
            _ => return Err(Self::expected("'=' or '+='", &operator)),
        };
        self.cursor.pop();

        let kind = self.scopes.symbol(symbol).kind;
        let expression = self.parse_expression(kind)?;

        Ok(Statement::Assign { symbol,
                               name: target.literal.clone(),
                               compound,
                               expression,
                               line: target.line,
                               column: target.column })
    }

    /// Parses `print` and `println` with their optional payload.
    fn parse_print(&mut self, keyword: &Token) -> ParseResult<Statement> {
        let next = self.cursor.peek().clone();
        let payload = match next.kind {
            TokenKind::NewLine | TokenKind::EndOfInput | TokenKind::RightBrace | TokenKind::Hash => {
                None
            },
            _ => match self.classify(&next)? {
                Some(kind) => Some(self.parse_expression(kind)?),
                None => return Err(Self::expected("an expression", &next)),
            },
        };

        Ok(if keyword.kind == TokenKind::Println {
               Statement::Println { payload,
                                    line: keyword.line,
                                    column: keyword.column }
           } else {
               Statement::Print { payload,
                                  line: keyword.line,
                                  column: keyword.column }
           })
    }

    /// Parses an expression that has to be of kind `expected`.
    ///
    /// # Errors
    /// - `KindMismatch` if the leading token belongs to the other kind.
    /// - `ExpectedToken` if no expression starts here.
    pub(super) fn parse_expression(&mut self, expected: DataKind) -> ParseResult<Expression> {
        let token = self.cursor.peek().clone();
        match self.classify(&token)? {
            Some(DataKind::Numeric) if expected == DataKind::Numeric => {
                Ok(Expression::Numeric(self.parse_num_expression()?))
            },
            Some(DataKind::Textual) if expected == DataKind::Textual => {
                Ok(Expression::Textual(self.parse_string_expression()?))
            },
            Some(actual) => Err(ParseError::KindMismatch { expected,
                                                           actual,
                                                           found: token.describe(),
                                                           line: token.line,
                                                           column: token.column }),
            None => Err(Self::expected(format!("a {expected} expression"), &token)),
        }
    }

    /// Decides the kind of the expression starting at `token`.
    ///
    /// String literals start textual expressions; numbers, `(` and `-` start
    /// numeric ones; a variable starts an expression of its declared kind.
    ///
    /// # Returns
    /// `None` if no expression can start with `token`.
    ///
    /// # Errors
    /// `UndeclaredVariable` if `token` names no visible variable.
    fn classify(&self, token: &Token) -> ParseResult<Option<DataKind>> {
        Ok(match token.kind {
               TokenKind::String => Some(DataKind::Textual),
               TokenKind::Integer | TokenKind::Float | TokenKind::LeftParen | TokenKind::Dash => {
                   Some(DataKind::Numeric)
               },
               TokenKind::Identifier => {
                   let symbol = self.lookup(token)?;
                   Some(self.scopes.symbol(symbol).kind)
               },
               _ => None,
           })
    }

    /// Resolves a variable reference against the open blocks.
    pub(super) fn lookup(&self, token: &Token) -> ParseResult<SymbolId> {
        self.scopes
            .get(self.current_scope(), &token.literal)
            .ok_or_else(|| ParseError::UndeclaredVariable { name:   token.literal.clone(),
                                                            line:   token.line,
                                                            column: token.column, })
    }

    /// Resolves a variable reference that has to be of kind `expected`.
    pub(super) fn lookup_kind(&self, token: &Token, expected: DataKind) -> ParseResult<SymbolId> {
        let symbol = self.lookup(token)?;
        let actual = self.scopes.symbol(symbol).kind;
        if actual != expected {
            return Err(ParseError::KindMismatch { expected,
                                                  actual,
                                                  found: token.literal.clone(),
                                                  line: token.line,
                                                  column: token.column });
        }
        Ok(symbol)
    }
}
