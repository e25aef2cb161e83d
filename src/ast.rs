use std::fmt;

use crate::interpreter::{
    scope::{ScopeId, Scopes, SymbolId},
    value::{DataKind, Number},
};

/// Debug rendering of the tree.
///
/// Every node renders its name followed by its children, one level of
/// indentation deeper.
pub mod dump;

/// A parsed program: the root block and the storage of every symbol it
/// declares.
///
/// The tree and the arena are created together by the parser and dropped
/// together once the program has run. The executor mutates symbol values in
/// `scopes` and never changes the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// The top-level block.
    pub root:   Block,
    /// All symbol tables and symbols, addressed by the handles in `root`.
    pub scopes: Scopes,
}

impl Program {
    /// An empty program with a single, empty root table.
    #[must_use]
    pub fn empty() -> Self {
        let mut scopes = Scopes::new();
        let scope = scopes.open(None);
        Self { root: Block { statements: Statements::default(),
                             scope,
                             line: 1,
                             column: 1 },
               scopes }
    }
}

/// A brace-delimited group of statements with its own symbol table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The statements of the block, in source order.
    pub statements: Statements,
    /// The symbol table of the block.
    pub scope:      ScopeId,
    /// Line of the opening brace (`1` for the program root).
    pub line:       usize,
    /// Column of the opening brace.
    pub column:     usize,
}

/// An ordered statement list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statements {
    /// The statements, in source order.
    pub list: Vec<Statement>,
}

/// Represents a single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Placeholder left where a statement failed to parse.
    Null,
    /// A declaration using `var`, with an optional initializer.
    Var {
        /// The declared symbol.
        symbol:      SymbolId,
        /// The declared name.
        name:        String,
        /// The declared data kind.
        kind:        DataKind,
        /// Value stored at declaration, if any.
        initializer: Option<Expression>,
        /// Line of the `var` keyword.
        line:        usize,
        /// Column of the `var` keyword.
        column:      usize,
    },
    /// Stores a value into an existing symbol with `=` or `+=`.
    Assign {
        /// The symbol the name resolved to at parse time.
        symbol:     SymbolId,
        /// The target name.
        name:       String,
        /// `true` for `+=`.
        compound:   bool,
        /// The value being assigned.
        expression: Expression,
        /// Line of the target name.
        line:       usize,
        /// Column of the target name.
        column:     usize,
    },
    /// `print`, without a trailing newline.
    Print {
        /// What to print; nothing when absent.
        payload: Option<Expression>,
        /// Line of the keyword.
        line:    usize,
        /// Column of the keyword.
        column:  usize,
    },
    /// `println`, with a trailing newline.
    Println {
        /// What to print before the newline.
        payload: Option<Expression>,
        /// Line of the keyword.
        line:    usize,
        /// Column of the keyword.
        column:  usize,
    },
    /// A nested block.
    Block(Block),
}

impl Statement {
    /// The source position of the statement, if it has one.
    ///
    /// ## Example
    /// ```
    /// use kab::ast::Statement;
    ///
    /// let stmt = Statement::Print { payload: None,
    ///                               line:    3,
    ///                               column:  5, };
    ///
    /// assert_eq!(stmt.position(), Some((3, 5)));
    /// assert_eq!(Statement::Null.position(), None);
    /// ```
    #[must_use]
    pub const fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::Null => None,
            Self::Var { line, column, .. }
            | Self::Assign { line, column, .. }
            | Self::Print { line, column, .. }
            | Self::Println { line, column, .. }
            | Self::Block(Block { line, column, .. }) => Some((*line, *column)),
        }
    }
}

/// An expression of either data kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// An arithmetic expression.
    Numeric(NumExpression),
    /// A string concatenation.
    Textual(StringExpression),
}

/// `NumExpression := Term [("+" | "-") NumExpression]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumExpression {
    /// The leading term.
    pub term: Term,
    /// The operator and the rest of the chain.
    pub rest: Option<(BinaryOperator, Box<NumExpression>)>,
}

/// `Term := Factor [("*" | "/") Term]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The leading factor.
    pub factor: Factor,
    /// The operator and the rest of the chain.
    pub rest:   Option<(BinaryOperator, Box<Term>)>,
}

/// The operands of arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factor {
    /// A numeric literal. A leading `-` is already folded in.
    Literal(Number),
    /// A parenthesized sub-expression.
    Paren(Box<NumExpression>),
    /// `-` in front of anything other than a literal.
    Negate(Box<Factor>),
    /// Reference to a numeric variable.
    Variable {
        /// Name of the variable.
        name:   String,
        /// The symbol the name resolved to at parse time.
        symbol: SymbolId,
        /// Line of the reference.
        line:   usize,
        /// Column of the reference.
        column: usize,
    },
}

/// `StringExpression := StringOperand ["+" StringExpression]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringExpression {
    /// The leading operand.
    pub operand: StringOperand,
    /// The rest of the concatenation.
    pub rest:    Option<Box<StringExpression>>,
}

/// The operands of string concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StringOperand {
    /// A string literal, without its quotes.
    Literal(String),
    /// Reference to a textual variable.
    Variable {
        /// Name of the variable.
        name:   String,
        /// The symbol the name resolved to at parse time.
        symbol: SymbolId,
        /// Line of the reference.
        line:   usize,
        /// Column of the reference.
        column: usize,
    },
}

/// Represents an arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{operator}")
    }
}
