use std::fmt;

use crate::{error::LexError, interpreter::lexer::definition::Lexicon};

/// The token definition table and its recognizers.
pub mod definition;
/// The keyword table applied after tokenization.
pub mod keyword;

/// The kind of a lexical token.
/// This enum defines all recognized tokens in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier tokens; variable names such as `x` or `total_1`.
    Identifier,
    /// `println`
    Println,
    /// `print`
    Print,
    /// `var`
    Var,
    /// `string`
    StringType,
    /// `number`
    NumberType,
    /// `for`, reserved.
    For,
    /// `if`, reserved.
    If,
    /// `else`, reserved.
    Else,
    /// Integer literal tokens, such as `42`.
    Integer,
    /// Float literal tokens, such as `2.5` or `3.`.
    Float,
    /// `%`
    Percent,
    /// `-`
    Dash,
    /// `+`
    Plus,
    /// `+=`
    PlusEquals,
    /// `++`
    DoublePlus,
    /// `*`
    Mult,
    /// `/`
    Div,
    /// `=`
    Equals,
    /// String literal tokens, quotes included: `"hello"`.
    String,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `<=`
    LessThanEquals,
    /// `<`
    LessThan,
    /// `>=`
    GreaterThanEquals,
    /// `>`
    GreaterThan,
    /// `==`
    DoubleEquals,
    /// `!`
    Not,
    /// `!=`
    NotEquals,
    /// `.`
    Period,
    /// `#`, starts a line comment.
    Hash,
    /// End of a source line. Inserted between lines, never lexed.
    NewLine,
    /// End of the token stream. Inserted after the last line.
    EndOfInput,
}

impl TokenKind {
    /// The display name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identifier => "Identifier",
            Self::Println => "Println",
            Self::Print => "Print",
            Self::Var => "Var",
            Self::StringType => "String Type",
            Self::NumberType => "Number Type",
            Self::For => "For",
            Self::If => "If",
            Self::Else => "Else",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Percent => "Percent",
            Self::Dash => "Dash",
            Self::Plus => "Plus",
            Self::PlusEquals => "Plus Equals",
            Self::DoublePlus => "Double Plus",
            Self::Mult => "Mult",
            Self::Div => "Div",
            Self::Equals => "Equals",
            Self::String => "String",
            Self::LeftBrace => "Left Curly Brace",
            Self::RightBrace => "Right Curly Brace",
            Self::LeftParen => "Left Paren",
            Self::RightParen => "Right Paren",
            Self::LessThanEquals => "Less Than or Equals",
            Self::LessThan => "Less Than",
            Self::GreaterThanEquals => "Greater Than or Equals",
            Self::GreaterThan => "Greater Than",
            Self::DoubleEquals => "Double Equals",
            Self::Not => "Not",
            Self::NotEquals => "Not Equals",
            Self::Period => "Period",
            Self::Hash => "Hash",
            Self::NewLine => "Newline",
            Self::EndOfInput => "End of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A classified lexical unit with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:    TokenKind,
    /// The source text of the token.
    pub literal: String,
    /// 1-based source line.
    pub line:    usize,
    /// 1-based column of the first character.
    pub column:  usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind,
               literal: literal.into(),
               line,
               column }
    }

    /// The text used for this token in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::NewLine | TokenKind::EndOfInput => self.kind.name().to_string(),
            _ => self.literal.clone(),
        }
    }
}

/// Tokenizes a single source line.
///
/// The line is scanned with longest-match-with-priority: the candidate buffer
/// grows one character at a time for as long as some definition could still
/// match it, remembering the best complete match seen so far. When the buffer
/// can no longer grow, the remembered token is emitted and scanning restarts
/// right after it. Identifiers are reclassified as keywords afterwards.
///
/// Text after a `#` is a comment and is not tokenized.
///
/// # Errors
/// Returns a [`LexError`] for the first piece of text that no definition
/// recognizes, or for a token left incomplete at the end of the line.
///
/// # Example
/// ```
/// use kab::interpreter::lexer::{TokenKind, definition::Lexicon, tokenize};
///
/// let lexicon = Lexicon::new();
/// let tokens = tokenize(&lexicon, "x += 2.3", 1).unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Identifier, TokenKind::PlusEquals, TokenKind::Float]);
/// assert_eq!(tokens[2].column, 6);
/// ```
pub fn tokenize(lexicon: &Lexicon, source_line: &str, line: usize) -> Result<Vec<Token>, LexError> {
    let chars: Vec<(usize, char)> = source_line.char_indices().collect();
    let offset = |index: usize| chars.get(index).map_or(source_line.len(), |(b, _)| *b);

    let mut tokens = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        if chars[start].1.is_whitespace() {
            start += 1;
            continue;
        }

        let mut best = None;
        let mut end = start;
        while end < chars.len() {
            let buffer = &source_line[offset(start)..offset(end + 1)];
            if !lexicon.is_viable(buffer) {
                break;
            }
            if let Some(def) = lexicon.best_match(buffer) {
                best = Some((def.kind, end + 1));
            }
            end += 1;
        }

        let Some((kind, stop)) = best else {
            let column = start + 1;
            return Err(if end == chars.len() {
                           LexError::Unterminated { text: source_line[offset(start)..].to_string(),
                                                    line,
                                                    column }
                       } else {
                           LexError::Unrecognized { text: source_line[offset(start)..offset(end + 1)].to_string(),
                                                    line,
                                                    column }
                       });
        };

        tokens.push(Token::new(kind, &source_line[offset(start)..offset(stop)], line, start + 1));
        start = stop;

        if kind == TokenKind::Hash {
            break;
        }
    }

    for token in &mut tokens {
        if token.kind == TokenKind::Identifier
           && let Some(kind) = lexicon.keyword(&token.literal)
        {
            token.kind = kind;
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<TokenKind> {
        tokenize(&Lexicon::new(), line, 1).unwrap()
                                          .into_iter()
                                          .map(|t| t.kind)
                                          .collect()
    }

    #[test]
    fn longest_match_prefers_multi_character_operators() {
        assert_eq!(kinds("+="), [TokenKind::PlusEquals]);
        assert_eq!(kinds("1 +=     2.3++"),
                   [TokenKind::Integer,
                    TokenKind::PlusEquals,
                    TokenKind::Float,
                    TokenKind::DoublePlus]);
        assert_eq!(kinds("<= < >= == != ="),
                   [TokenKind::LessThanEquals,
                    TokenKind::LessThan,
                    TokenKind::GreaterThanEquals,
                    TokenKind::DoubleEquals,
                    TokenKind::NotEquals,
                    TokenKind::Equals]);
    }

    #[test]
    fn floats_are_single_tokens() {
        let tokens = tokenize(&Lexicon::new(), "1+2.3", 1).unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::new(TokenKind::Integer, "1", 1, 1));
        assert_eq!(tokens[1], Token::new(TokenKind::Plus, "+", 1, 2));
        assert_eq!(tokens[2], Token::new(TokenKind::Float, "2.3", 1, 3));
    }

    #[test]
    fn identifiers_with_underscores_and_digits() {
        let tokens = tokenize(&Lexicon::new(), "  my_number1=1+ 0.3  ", 4).unwrap();
        let literals: Vec<_> = tokens.iter().map(|t| t.literal.as_str()).collect();

        assert_eq!(literals, ["my_number1", "=", "1", "+", "0.3"]);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].line, 4);
        assert_eq!(tokens[0].column, 3);
    }

    #[test]
    fn keywords_are_reclassified_by_exact_match() {
        assert_eq!(kinds("println"), [TokenKind::Println]);
        assert_eq!(kinds("printlnx"), [TokenKind::Identifier]);
        assert_eq!(kinds("var x string"),
                   [TokenKind::Var, TokenKind::Identifier, TokenKind::StringType]);
        assert_eq!(kinds("if else for"),
                   [TokenKind::If, TokenKind::Else, TokenKind::For]);
    }

    #[test]
    fn strings_keep_whitespace_and_quotes() {
        let tokens = tokenize(&Lexicon::new(), "print \"a + b\" + \"c\"", 1).unwrap();

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].literal, "\"a + b\"");
        assert_eq!(tokens[2].kind, TokenKind::Plus);
        assert_eq!(tokens[3].literal, "\"c\"");
    }

    #[test]
    fn tokens_split_where_the_buffer_stops_matching() {
        assert_eq!(kinds("x*(y-2)"),
                   [TokenKind::Identifier,
                    TokenKind::Mult,
                    TokenKind::LeftParen,
                    TokenKind::Identifier,
                    TokenKind::Dash,
                    TokenKind::Integer,
                    TokenKind::RightParen]);
        assert_eq!(kinds("2.x"), [TokenKind::Float, TokenKind::Identifier]);
    }

    #[test]
    fn comments_are_not_tokenized() {
        assert_eq!(kinds("println 1 # it's ~fine~"),
                   [TokenKind::Println, TokenKind::Integer, TokenKind::Hash]);
    }

    #[test]
    fn unknown_characters_are_errors() {
        let err = tokenize(&Lexicon::new(), "  my_number1 = ~1+ .3", 7).unwrap_err();

        assert_eq!(err,
                   LexError::Unrecognized { text:   "~".to_string(),
                                            line:   7,
                                            column: 16, });
    }

    #[test]
    fn unclosed_strings_are_unterminated() {
        let err = tokenize(&Lexicon::new(), "print \"abc", 2).unwrap_err();

        assert_eq!(err,
                   LexError::Unterminated { text:   "\"abc".to_string(),
                                            line:   2,
                                            column: 7, });
    }
}
