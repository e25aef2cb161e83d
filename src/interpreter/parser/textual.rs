use crate::{
    ast::{StringExpression, StringOperand},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
        value::DataKind,
    },
};

impl Parser {
    /// Parses a string concatenation.
    ///
    /// Grammar: `string_expression := (String | Identifier) ["+" string_expression]`
    ///
    /// Literal text is stored without its quotes. Variables must be textual.
    ///
    /// # Errors
    /// - `ExpectedToken` if an operand is missing, including after a `+`.
    /// - `UndeclaredVariable` and `KindMismatch` for bad variable references.
    pub(super) fn parse_string_expression(&mut self) -> ParseResult<StringExpression> {
        let token = self.cursor.peek().clone();

        let operand = match token.kind {
            TokenKind::String => {
                let text = token.literal
                                .strip_prefix('"')
                                .and_then(|t| t.strip_suffix('"'))
                                .unwrap_or(&token.literal);
                StringOperand::Literal(text.to_string())
            },
            TokenKind::Identifier => {
                let symbol = self.lookup_kind(&token, DataKind::Textual)?;
                StringOperand::Variable { name: token.literal.clone(),
                                          symbol,
                                          line: token.line,
                                          column: token.column }
            },
            _ => return Err(Self::expected("a string or a string variable", &token)),
        };
        self.cursor.pop();

        if self.cursor.pop().kind != TokenKind::Plus {
            self.cursor.pushback();
            return Ok(StringExpression { operand, rest: None });
        }

        let rest = self.parse_string_expression()?;
        Ok(StringExpression { operand,
                              rest: Some(Box::new(rest)) })
    }
}
