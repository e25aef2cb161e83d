use crate::interpreter::lexer::{TokenKind, keyword::Keyword};

/// Priority of the open-ended literal recognizers (identifiers, integers and
/// strings). Always the lowest.
pub const LITERAL_PRIORITY: u8 = 1;
/// Priority of floats and single-character operators.
pub const SINGLE_PRIORITY: u8 = 2;
/// Priority of multi-character operators, above their one-character prefixes.
pub const MULTI_PRIORITY: u8 = 3;

/// The recognizer of a token definition.
///
/// A recognizer answers two questions about a candidate buffer: whether the
/// buffer is already a complete token ([`Pattern::matches`]), and whether it
/// could still grow into one ([`Pattern::accepts_prefix`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Exactly this text.
    Exact(&'static str),
    /// `[a-zA-Z][a-zA-Z_0-9]*`
    Identifier,
    /// `[0-9]+`
    Integer,
    /// `[0-9]+\.[0-9]*`
    Float,
    /// A double-quoted string without embedded quotes.
    Text,
}

impl Pattern {
    /// Returns `true` when `buffer` is a complete match.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::lexer::definition::Pattern;
    ///
    /// assert!(Pattern::Float.matches("2.3"));
    /// assert!(Pattern::Float.matches("2."));
    /// assert!(!Pattern::Float.matches("2"));
    /// assert!(Pattern::Text.matches("\"a b\""));
    /// ```
    #[must_use]
    pub fn matches(self, buffer: &str) -> bool {
        match self {
            Self::Exact(text) => buffer == text,
            Self::Identifier => {
                let mut chars = buffer.chars();
                chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            },
            Self::Integer => !buffer.is_empty() && buffer.chars().all(|c| c.is_ascii_digit()),
            Self::Float => buffer.split_once('.')
                                 .is_some_and(|(whole, fraction)| {
                                     Self::Integer.matches(whole)
                                     && fraction.chars().all(|c| c.is_ascii_digit())
                                 }),
            Self::Text => {
                buffer.len() >= 2
                && buffer.starts_with('"')
                && buffer.ends_with('"')
                && !buffer[1..buffer.len() - 1].contains('"')
            },
        }
    }

    /// Returns `true` when `buffer` is a complete match or can be extended
    /// into one.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::lexer::definition::Pattern;
    ///
    /// assert!(Pattern::Exact("+=").accepts_prefix("+"));
    /// assert!(Pattern::Text.accepts_prefix("\"unfinished text"));
    /// assert!(!Pattern::Integer.accepts_prefix("1a"));
    /// ```
    #[must_use]
    pub fn accepts_prefix(self, buffer: &str) -> bool {
        match self {
            Self::Exact(text) => text.starts_with(buffer),
            Self::Identifier | Self::Integer => self.matches(buffer),
            Self::Float => match buffer.split_once('.') {
                Some(_) => self.matches(buffer),
                None => Self::Integer.matches(buffer),
            },
            Self::Text => {
                buffer.starts_with('"')
                && match buffer[1..].find('"') {
                    Some(close) => close == buffer.len() - 2,
                    None => true,
                }
            },
        }
    }
}

/// One entry of the token definition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDefinition {
    /// The kind of token this definition produces.
    pub kind:     TokenKind,
    /// The recognizer deciding which text belongs to this token.
    pub pattern:  Pattern,
    /// Human readable name, used in diagnostics.
    pub name:     &'static str,
    /// Breaks ties between complete matches of the same text; highest wins.
    pub priority: u8,
}

impl TokenDefinition {
    const fn new(kind: TokenKind, pattern: Pattern, priority: u8) -> Self {
        Self { kind,
               pattern,
               name: kind.name(),
               priority }
    }
}

/// The immutable tables the tokenizer works from.
///
/// Built once with [`Lexicon::new`] and passed by reference to every
/// tokenizer call.
#[derive(Debug, Clone)]
pub struct Lexicon {
    definitions: Vec<TokenDefinition>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Builds the token definition table of the language.
    #[must_use]
    pub fn new() -> Self {
        use Pattern::{Exact, Float, Identifier, Integer, Text};
        use TokenKind as K;

        let definitions = vec![TokenDefinition::new(K::Identifier, Identifier, LITERAL_PRIORITY),
                               TokenDefinition::new(K::Integer, Integer, LITERAL_PRIORITY),
                               TokenDefinition::new(K::String, Text, LITERAL_PRIORITY),
                               TokenDefinition::new(K::Float, Float, SINGLE_PRIORITY),
                               TokenDefinition::new(K::Percent, Exact("%"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::Dash, Exact("-"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::Plus, Exact("+"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::PlusEquals, Exact("+="), MULTI_PRIORITY),
                               TokenDefinition::new(K::DoublePlus, Exact("++"), MULTI_PRIORITY),
                               TokenDefinition::new(K::Mult, Exact("*"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::Div, Exact("/"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::Equals, Exact("="), SINGLE_PRIORITY),
                               TokenDefinition::new(K::LeftBrace, Exact("{"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::RightBrace, Exact("}"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::LeftParen, Exact("("), SINGLE_PRIORITY),
                               TokenDefinition::new(K::RightParen, Exact(")"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::LessThanEquals,
                                                    Exact("<="),
                                                    MULTI_PRIORITY),
                               TokenDefinition::new(K::LessThan, Exact("<"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::GreaterThanEquals,
                                                    Exact(">="),
                                                    MULTI_PRIORITY),
                               TokenDefinition::new(K::GreaterThan, Exact(">"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::DoubleEquals, Exact("=="), MULTI_PRIORITY),
                               TokenDefinition::new(K::Not, Exact("!"), SINGLE_PRIORITY),
                               TokenDefinition::new(K::NotEquals, Exact("!="), MULTI_PRIORITY),
                               TokenDefinition::new(K::Period, Exact("."), SINGLE_PRIORITY),
                               TokenDefinition::new(K::Hash, Exact("#"), SINGLE_PRIORITY),];

        Self { definitions }
    }

    /// All token definitions, in table order.
    #[must_use]
    pub fn definitions(&self) -> &[TokenDefinition] {
        &self.definitions
    }

    /// Returns `true` if any definition accepts `buffer` as a prefix.
    #[must_use]
    pub fn is_viable(&self, buffer: &str) -> bool {
        self.definitions
            .iter()
            .any(|def| def.pattern.accepts_prefix(buffer))
    }

    /// The highest priority definition that matches all of `buffer`.
    #[must_use]
    pub fn best_match(&self, buffer: &str) -> Option<&TokenDefinition> {
        self.definitions
            .iter()
            .filter(|def| def.pattern.matches(buffer))
            .max_by_key(|def| def.priority)
    }

    /// The keyword kind spelled exactly by `text`, if any.
    #[must_use]
    pub fn keyword(&self, text: &str) -> Option<TokenKind> {
        Keyword::lookup(text).map(Keyword::token_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_character_operators_outrank_their_prefixes() {
        let lexicon = Lexicon::new();
        let plus = lexicon.best_match("+").unwrap();
        let plus_equals = lexicon.best_match("+=").unwrap();

        assert_eq!(plus.kind, TokenKind::Plus);
        assert_eq!(plus_equals.kind, TokenKind::PlusEquals);
        assert!(plus_equals.priority > plus.priority);
    }

    #[test]
    fn literal_recognizers_have_lowest_priority() {
        let lexicon = Lexicon::new();
        let lowest = lexicon.definitions()
                            .iter()
                            .map(|def| def.priority)
                            .min()
                            .unwrap();

        for def in lexicon.definitions() {
            if matches!(def.kind,
                        TokenKind::Identifier | TokenKind::Integer | TokenKind::String)
            {
                assert_eq!(def.priority, lowest, "{}", def.name);
            }
        }
    }

    #[test]
    fn viability_tracks_partial_tokens() {
        let lexicon = Lexicon::new();

        assert!(lexicon.is_viable("\"open"));
        assert!(lexicon.is_viable("12."));
        assert!(!lexicon.is_viable("12.3."));
        assert!(!lexicon.is_viable("~"));
        assert!(!lexicon.is_viable("\"done\" "));
    }

    #[test]
    fn keywords_require_exact_text() {
        let lexicon = Lexicon::new();

        assert_eq!(lexicon.keyword("var"), Some(TokenKind::Var));
        assert_eq!(lexicon.keyword("number"), Some(TokenKind::NumberType));
        assert_eq!(lexicon.keyword("variable"), None);
        assert_eq!(lexicon.keyword("Var"), None);
    }
}
