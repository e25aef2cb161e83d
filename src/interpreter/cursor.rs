use crate::{
    error::LexError,
    interpreter::lexer::{Token, TokenKind, definition::Lexicon, tokenize},
};

/// A pull-based cursor over the token sequence of a whole program.
///
/// The last token is always an [`TokenKind::EndOfInput`] sentinel, which
/// [`TokenCursor::pop`] keeps returning once it is reached.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens:   Vec<Token>,
    position: usize,
}

impl TokenCursor {
    /// Creates a cursor over `tokens`, appending the end-of-input sentinel if
    /// it is missing.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::EndOfInput) {
            let (line, column) = tokens.last().map_or((1, 1), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::EndOfInput, "", line, column));
        }
        Self { tokens,
               position: 0 }
    }

    /// Tokenizes a program line by line.
    ///
    /// A newline token is inserted at the end of every line and the
    /// end-of-input sentinel after the last one. A line that fails to
    /// tokenize contributes its error and none of its tokens.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::{cursor::TokenCursor, lexer::{TokenKind, definition::Lexicon}};
    ///
    /// let (mut cursor, errors) = TokenCursor::from_lines(&Lexicon::new(), &["println 1"]);
    /// assert!(errors.is_empty());
    ///
    /// assert_eq!(cursor.pop().kind, TokenKind::Println);
    /// assert_eq!(cursor.pop().kind, TokenKind::Integer);
    /// assert_eq!(cursor.pop().kind, TokenKind::NewLine);
    /// assert_eq!(cursor.pop().kind, TokenKind::EndOfInput);
    /// assert_eq!(cursor.pop().kind, TokenKind::EndOfInput);
    /// ```
    pub fn from_lines<S: AsRef<str>>(lexicon: &Lexicon, lines: &[S]) -> (Self, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        let mut end = (1, 1);

        for (index, source_line) in lines.iter().enumerate() {
            let source_line = source_line.as_ref();
            let line = index + 1;

            match tokenize(lexicon, source_line, line) {
                Ok(mut line_tokens) => tokens.append(&mut line_tokens),
                Err(e) => errors.push(e),
            }
            end = (line, source_line.chars().count() + 1);
            tokens.push(Token::new(TokenKind::NewLine, "\n", end.0, end.1));
        }
        tokens.push(Token::new(TokenKind::EndOfInput, "", end.0, end.1));

        (Self::new(tokens), errors)
    }

    /// Returns the current token and advances.
    ///
    /// Reading past the end keeps yielding the end-of-input sentinel, and a
    /// [`TokenCursor::pushback`] after such a read lands on the sentinel
    /// again.
    pub fn pop(&mut self) -> Token {
        let token = self.peek().clone();
        self.position = self.position.saturating_add(1);
        token
    }

    /// Returns the current token without advancing.
    #[must_use]
    pub fn peek(&self) -> &Token {
        &self.tokens[self.position.min(self.tokens.len() - 1)]
    }

    /// Steps back by one token. Does nothing at the first token.
    pub const fn pushback(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Consumes the current token if it has the given kind.
    pub fn swallow(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.pop();
            return true;
        }
        false
    }

    /// Returns `true` once the cursor rests on the end-of-input sentinel.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfInput
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(lines: &[&str]) -> TokenCursor {
        let (cursor, errors) = TokenCursor::from_lines(&Lexicon::new(), lines);
        assert!(errors.is_empty(), "{errors:?}");
        cursor
    }

    #[test]
    fn lines_are_separated_by_newline_tokens() {
        let mut cursor = cursor(&["var x number", "x = 1"]);
        let mut kinds = Vec::new();
        while !cursor.at_end() {
            kinds.push(cursor.pop().kind);
        }

        assert_eq!(kinds,
                   [TokenKind::Var,
                    TokenKind::Identifier,
                    TokenKind::NumberType,
                    TokenKind::NewLine,
                    TokenKind::Identifier,
                    TokenKind::Equals,
                    TokenKind::Integer,
                    TokenKind::NewLine]);
    }

    #[test]
    fn pushback_rewinds_one_token() {
        let mut cursor = cursor(&["1 + 2"]);

        assert_eq!(cursor.pop().literal, "1");
        assert_eq!(cursor.pop().literal, "+");
        cursor.pushback();
        assert_eq!(cursor.peek().literal, "+");
        assert_eq!(cursor.pop().literal, "+");
    }

    #[test]
    fn pushback_is_clamped_at_the_start() {
        let mut cursor = cursor(&["x"]);

        cursor.pushback();
        cursor.pushback();
        assert_eq!(cursor.pop().literal, "x");
    }

    #[test]
    fn end_of_input_is_sticky() {
        let mut cursor = TokenCursor::new(Vec::new());

        assert_eq!(cursor.pop().kind, TokenKind::EndOfInput);
        assert_eq!(cursor.pop().kind, TokenKind::EndOfInput);
        assert!(cursor.at_end());
    }

    #[test]
    fn pushback_after_end_of_input_stays_at_the_end() {
        let mut cursor = cursor(&["1"]);

        assert_eq!(cursor.pop().kind, TokenKind::Integer);
        assert_eq!(cursor.pop().kind, TokenKind::NewLine);
        assert_eq!(cursor.pop().kind, TokenKind::EndOfInput);
        cursor.pushback();
        assert!(cursor.at_end());
    }

    #[test]
    fn swallow_only_consumes_matching_tokens() {
        let mut cursor = cursor(&["( )"]);

        assert!(!cursor.swallow(TokenKind::RightParen));
        assert!(cursor.swallow(TokenKind::LeftParen));
        assert!(cursor.swallow(TokenKind::RightParen));
        assert!(cursor.swallow(TokenKind::NewLine));
    }

    #[test]
    fn failing_lines_keep_their_newline() {
        let (mut cursor, errors) = TokenCursor::from_lines(&Lexicon::new(), &["x = ~", "y"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line(), 1);
        assert_eq!(cursor.pop().kind, TokenKind::NewLine);
        assert_eq!(cursor.pop().literal, "y");
    }
}
