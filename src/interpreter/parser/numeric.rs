use crate::{
    ast::{BinaryOperator, Factor, NumExpression, Term},
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{ParseResult, Parser},
        value::{DataKind, Number},
    },
};

impl Parser {
    /// Parses additive expressions.
    ///
    /// Grammar: `num_expression := term [("+" | "-") num_expression]`
    ///
    /// The chain is right-recursive: `a - b - c` parses as `a - (b - c)`.
    ///
    /// # Returns
    /// A `NumExpression` node.
    pub(super) fn parse_num_expression(&mut self) -> ParseResult<NumExpression> {
        let term = self.parse_term()?;

        let operator = match self.cursor.pop().kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Dash => BinaryOperator::Sub,
            _ => {
                self.cursor.pushback();
                return Ok(NumExpression { term, rest: None });
            },
        };

        let rest = self.parse_num_expression()?;
        Ok(NumExpression { term,
                           rest: Some((operator, Box::new(rest))) })
    }

    /// Parses multiplicative expressions.
    ///
    /// Grammar: `term := factor [("*" | "/") term]`
    fn parse_term(&mut self) -> ParseResult<Term> {
        let factor = self.parse_factor()?;

        let operator = match self.cursor.pop().kind {
            TokenKind::Mult => BinaryOperator::Mul,
            TokenKind::Div => BinaryOperator::Div,
            _ => {
                self.cursor.pushback();
                return Ok(Term { factor, rest: None });
            },
        };

        let rest = self.parse_term()?;
        Ok(Term { factor,
                  rest: Some((operator, Box::new(rest))) })
    }

    /// Parses the operands of arithmetic.
    ///
    /// Grammar:
    /// ```text
    /// factor := Integer | Float | "-" factor | "(" num_expression ")" | Identifier
    /// ```
    /// A `-` directly in front of a literal is folded into the literal.
    ///
    /// # Errors
    /// - `ExpectedClosingParen` for an unbalanced `(`.
    /// - `UndeclaredVariable` and `KindMismatch` for bad variable references.
    /// - `LiteralTooLarge` for integers outside the 64-bit range.
    fn parse_factor(&mut self) -> ParseResult<Factor> {
        let token = self.cursor.peek().clone();

        match token.kind {
            TokenKind::Integer | TokenKind::Float => {
                self.cursor.pop();
                Ok(Factor::Literal(number(&token)?))
            },
            TokenKind::Dash => {
                self.cursor.pop();
                let next = self.cursor.peek().clone();
                if matches!(next.kind, TokenKind::Integer | TokenKind::Float) {
                    self.cursor.pop();
                    Ok(Factor::Literal(negative_number(&next)?))
                } else {
                    Ok(Factor::Negate(Box::new(self.parse_factor()?)))
                }
            },
            TokenKind::LeftParen => {
                self.cursor.pop();
                let inner = self.parse_num_expression()?;
                let close = self.cursor.peek().clone();
                if close.kind != TokenKind::RightParen {
                    return Err(ParseError::ExpectedClosingParen { found:  close.describe(),
                                                                  line:   close.line,
                                                                  column: close.column, });
                }
                self.cursor.pop();
                Ok(Factor::Paren(Box::new(inner)))
            },
            TokenKind::Identifier => {
                let symbol = self.lookup_kind(&token, DataKind::Numeric)?;
                self.cursor.pop();
                Ok(Factor::Variable { name: token.literal,
                                      symbol,
                                      line: token.line,
                                      column: token.column })
            },
            _ => Err(Self::expected("a number, '(', '-' or a variable", &token)),
        }
    }
}

/// Converts a numeric literal token.
fn number(token: &Token) -> ParseResult<Number> {
    literal(token, &token.literal)
}

/// Converts a numeric literal token preceded by `-`.
///
/// The sign is parsed with the digits so that `i64::MIN` is accepted.
fn negative_number(token: &Token) -> ParseResult<Number> {
    literal(token, &format!("-{}", token.literal))
}

fn literal(token: &Token, text: &str) -> ParseResult<Number> {
    let too_large = || ParseError::LiteralTooLarge { literal: text.to_string(),
                                                     line:    token.line,
                                                     column:  token.column, };
    match token.kind {
        TokenKind::Float => text.parse::<f64>().map(Number::from).map_err(|_| too_large()),
        _ => text.parse::<i64>().map(Number::from).map_err(|_| too_large()),
    }
}
