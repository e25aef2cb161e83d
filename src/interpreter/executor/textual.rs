use std::io::Write;

use crate::{
    ast::{StringExpression, StringOperand},
    error::RuntimeError,
    interpreter::{
        executor::core::{EvalResult, Executor},
        scope::Scopes,
        value::Value,
    },
};

impl<W: Write> Executor<W> {
    /// Concatenates the operands of a string expression, left to right.
    ///
    /// Variables contribute their value at the time of evaluation.
    pub(super) fn evaluate_string(&self, expression: &StringExpression, scopes: &Scopes) -> EvalResult<String> {
        let mut result = String::new();
        let mut next = Some(expression);

        while let Some(current) = next {
            match &current.operand {
                StringOperand::Literal(text) => result.push_str(text),
                StringOperand::Variable { name,
                                          symbol,
                                          line,
                                          column, } => {
                    match self.read(scopes, *symbol, name, (*line, *column))? {
                        Value::Textual(text) => result.push_str(text),
                        Value::Numeric(_) => {
                            return Err(RuntimeError::InvalidReference { name: name.clone(),
                                                                        details: "expected a string variable".to_string(),
                                                                        line: *line,
                                                                        column: *column });
                        },
                    }
                },
            }
            next = current.rest.as_deref();
        }

        Ok(result)
    }
}
