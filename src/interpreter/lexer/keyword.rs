use logos::Logos;

use crate::interpreter::lexer::TokenKind;

/// Reserved words of the language.
///
/// Keywords are not part of the token definition table: identifiers are
/// lexed first and then checked against this table by exact match, so that
/// `println` becomes a keyword while `printlnx` stays an identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `println`
    #[token("println")]
    Println,
    /// `print`
    #[token("print")]
    Print,
    /// `var`
    #[token("var")]
    Var,
    /// `string`
    #[token("string")]
    StringType,
    /// `number`
    #[token("number")]
    NumberType,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
}

impl Keyword {
    /// Looks up `text` as a whole word.
    ///
    /// Returns `None` unless the keyword recognizer consumes all of `text` as
    /// exactly one keyword.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::lexer::keyword::Keyword;
    ///
    /// assert_eq!(Keyword::lookup("println"), Some(Keyword::Println));
    /// assert_eq!(Keyword::lookup("printlnx"), None);
    /// assert_eq!(Keyword::lookup("prin"), None);
    /// ```
    #[must_use]
    pub fn lookup(text: &str) -> Option<Self> {
        let mut lexer = Self::lexer(text);
        let keyword = lexer.next()?.ok()?;

        if lexer.span().end != text.len() || lexer.next().is_some() {
            return None;
        }

        Some(keyword)
    }

    /// The token kind an identifier is rewritten to.
    #[must_use]
    pub const fn token_kind(self) -> TokenKind {
        match self {
            Self::Println => TokenKind::Println,
            Self::Print => TokenKind::Print,
            Self::Var => TokenKind::Var,
            Self::StringType => TokenKind::StringType,
            Self::NumberType => TokenKind::NumberType,
            Self::For => TokenKind::For,
            Self::If => TokenKind::If,
            Self::Else => TokenKind::Else,
        }
    }
}
