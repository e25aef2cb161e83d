use crate::{
    ast::{
        Block, Expression, Factor, NumExpression, Program, Statement, Statements, StringExpression,
        StringOperand, Term,
    },
    interpreter::scope::Scopes,
};

/// Indentation added per nesting level.
pub const INDENT_STEP: &str = "  ";

/// Renders a node and its children as an indented outline.
///
/// Nodes that refer to symbols read their name, kind and current value from
/// `scopes`, so dumping after execution shows final values.
///
/// # Example
/// ```
/// use kab::{ast::dump::AsString, parse};
///
/// let outcome = parse(&["println 1 + 2"]);
/// let program = outcome.program;
///
/// assert_eq!(program.as_string(&program.scopes, ""),
///            "Program\n  Block\n    Statements\n      PrintlnStatement\n        NumExpression\n          Term\n            Factor\n              Signed number: '1'\n          +\n          NumExpression\n            Term\n              Factor\n                Signed number: '2'");
/// ```
pub trait AsString {
    /// Renders `self`, prefixing every line with at least `indent`.
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String;
}

fn deeper(indent: &str) -> String {
    format!("{indent}{INDENT_STEP}")
}

impl AsString for Program {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        format!("{indent}Program\n{}", self.root.as_string(scopes, &deeper(indent)))
    }
}

impl AsString for Block {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        format!("{indent}Block\n{}", self.statements.as_string(scopes, &deeper(indent)))
    }
}

impl AsString for Statements {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        let inner = deeper(indent);
        let mut result = format!("{indent}Statements");
        for statement in &self.list {
            result.push('\n');
            result.push_str(&statement.as_string(scopes, &inner));
        }
        result
    }
}

impl AsString for Statement {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        let inner = deeper(indent);
        match self {
            Self::Null => format!("{indent}NullStatement"),
            Self::Var { symbol,
                        initializer,
                        .. } => {
                let mut result =
                    format!("{indent}VarStatement : {}", scopes.symbol(*symbol).describe());
                if let Some(expression) = initializer {
                    result.push_str(&format!("\n{inner}=\n{}",
                                             expression.as_string(scopes, &inner)));
                }
                result
            },
            Self::Assign { symbol,
                           compound,
                           expression,
                           .. } => {
                let operator = if *compound { "+=" } else { "=" };
                format!("{indent}AssignStatement : {}\n{inner}{operator}\n{}",
                        scopes.symbol(*symbol).describe(),
                        expression.as_string(scopes, &inner))
            },
            Self::Print { payload, .. } => print_as_string("PrintStatement",
                                                           payload.as_ref(),
                                                           scopes,
                                                           indent),
            Self::Println { payload, .. } => print_as_string("PrintlnStatement",
                                                             payload.as_ref(),
                                                             scopes,
                                                             indent),
            Self::Block(block) => block.as_string(scopes, indent),
        }
    }
}

fn print_as_string(name: &str,
                   payload: Option<&Expression>,
                   scopes: &Scopes,
                   indent: &str)
                   -> String {
    match payload {
        Some(expression) => {
            format!("{indent}{name}\n{}", expression.as_string(scopes, &deeper(indent)))
        },
        None => format!("{indent}{name}"),
    }
}

impl AsString for Expression {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        match self {
            Self::Numeric(expression) => expression.as_string(scopes, indent),
            Self::Textual(expression) => expression.as_string(scopes, indent),
        }
    }
}

impl AsString for NumExpression {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        let inner = deeper(indent);
        let mut result = format!("{indent}NumExpression\n{}", self.term.as_string(scopes, &inner));
        if let Some((op, rest)) = &self.rest {
            result.push_str(&format!("\n{inner}{op}\n{}", rest.as_string(scopes, &inner)));
        }
        result
    }
}

impl AsString for Term {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        let inner = deeper(indent);
        let mut result = format!("{indent}Term\n{}", self.factor.as_string(scopes, &inner));
        if let Some((op, rest)) = &self.rest {
            result.push_str(&format!("\n{inner}{op}\n{}", rest.as_string(scopes, &inner)));
        }
        result
    }
}

impl AsString for Factor {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        let inner = deeper(indent);
        let child = match self {
            Self::Literal(number) => format!("{inner}Signed number: '{number}'"),
            Self::Paren(expression) => expression.as_string(scopes, &inner),
            Self::Negate(factor) => format!("{inner}-\n{}", factor.as_string(scopes, &inner)),
            Self::Variable { symbol, .. } => {
                format!("{inner}{}", scopes.symbol(*symbol).describe())
            },
        };
        format!("{indent}Factor\n{child}")
    }
}

impl AsString for StringExpression {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        let inner = deeper(indent);
        let mut result =
            format!("{indent}StringExpression\n{}", self.operand.as_string(scopes, &inner));
        if let Some(rest) = &self.rest {
            result.push_str(&format!("\n{inner}+\n{}", rest.as_string(scopes, &inner)));
        }
        result
    }
}

impl AsString for StringOperand {
    fn as_string(&self, scopes: &Scopes, indent: &str) -> String {
        match self {
            Self::Literal(text) => format!("{indent}String: '{text}'"),
            Self::Variable { symbol, .. } => {
                format!("{indent}{}", scopes.symbol(*symbol).describe())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn dump(lines: &[&str]) -> String {
        let outcome = parse(lines);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        outcome.program.as_string(&outcome.program.scopes, "")
    }

    #[test]
    fn declarations_show_symbol_and_initializer() {
        let dump = dump(&["var name string = \"kab\""]);

        assert!(dump.contains("      VarStatement : Symbol: name                  string\n"),
                "{dump}");
        assert!(dump.ends_with("\n        =\n        StringExpression\n          String: 'kab'"),
                "{dump}");
    }

    #[test]
    fn nested_blocks_are_indented_one_step_per_level() {
        let dump = dump(&["{", "print \"x\"", "}"]);

        assert_eq!(dump,
                   "Program\n  Block\n    Statements\n      Block\n        Statements\n          \
                    PrintStatement\n            StringExpression\n              String: 'x'");
    }

    #[test]
    fn negation_of_non_literals_is_shown() {
        let dump = dump(&["var x number = 2", "println -x"]);

        assert!(dump.contains("Factor\n              -\n              Factor\n                Symbol: x"),
                "{dump}");
    }
}
