use std::io::Write;

use crate::{
    ast::{BinaryOperator, Factor, NumExpression, Term},
    error::RuntimeError,
    interpreter::{
        executor::core::{EvalResult, Executor},
        scope::Scopes,
        value::{Number, Value},
    },
};

impl<W: Write> Executor<W> {
    /// Evaluates an additive chain.
    ///
    /// Each operator combines its left term with the value of the whole
    /// remaining chain, so `10 - 4 - 3` is `10 - (4 - 3)`.
    ///
    /// # Errors
    /// `Overflow` if integer arithmetic leaves the 64-bit range.
    pub(super) fn evaluate_num(&self, expression: &NumExpression, scopes: &Scopes) -> EvalResult<Number> {
        let term = self.evaluate_term(&expression.term, scopes)?;

        match &expression.rest {
            Some((operator, rest)) => self.apply(term, *operator, self.evaluate_num(rest, scopes)?),
            None => Ok(term),
        }
    }

    /// Evaluates a multiplicative chain; `8 / 4 / 2` is `8 / (4 / 2)`.
    fn evaluate_term(&self, term: &Term, scopes: &Scopes) -> EvalResult<Number> {
        let factor = self.evaluate_factor(&term.factor, scopes)?;

        match &term.rest {
            Some((operator, rest)) => self.apply(factor, *operator, self.evaluate_term(rest, scopes)?),
            None => Ok(factor),
        }
    }

    fn evaluate_factor(&self, factor: &Factor, scopes: &Scopes) -> EvalResult<Number> {
        match factor {
            Factor::Literal(number) => Ok(*number),
            Factor::Paren(expression) => self.evaluate_num(expression, scopes),
            Factor::Negate(inner) => {
                let value = self.evaluate_factor(inner, scopes)?;
                self.apply(value, BinaryOperator::Mul, Number::Integer(-1))
            },
            Factor::Variable { name,
                               symbol,
                               line,
                               column, } => match self.read(scopes, *symbol, name, (*line, *column))? {
                Value::Numeric(number) => Ok(*number),
                Value::Textual(_) => Err(RuntimeError::InvalidReference { name: name.clone(),
                                                                          details: "expected a number variable".to_string(),
                                                                          line: *line,
                                                                          column: *column }),
            },
        }
    }

    /// Applies one arithmetic operator.
    ///
    /// `+ - *` stay integer for integer operands and promote to float
    /// otherwise. `/` always produces a float; dividing by zero yields an
    /// infinity or NaN.
    fn apply(&self, lhs: Number, operator: BinaryOperator, rhs: Number) -> EvalResult<Number> {
        let result = match operator {
            BinaryOperator::Add => lhs.checked_add(rhs),
            BinaryOperator::Sub => lhs.checked_sub(rhs),
            BinaryOperator::Mul => lhs.checked_mul(rhs),
            BinaryOperator::Div => Some(lhs.quotient(rhs)),
        };
        result.ok_or_else(|| self.overflow())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, RuntimeError},
        interpreter::executor::core::Executor,
        parse,
    };

    fn run(lines: &[&str]) -> (String, Vec<RuntimeError>) {
        let outcome = parse(lines);
        assert!(outcome.errors.is_empty(), "{:?}", outcome.errors);
        let mut program = outcome.program;

        let mut out = Vec::new();
        let mut executor = Executor::new(&mut out);
        executor.execute(&mut program);
        let errors = executor.into_errors();

        (String::from_utf8(out).unwrap(), errors)
    }

    #[test]
    fn chains_group_to_the_right() {
        let (out, errors) = run(&["println 10 - 4 - 3", "println 8 / 4 / 2", "println 2 * 3 - 4 / 2"]);

        assert!(errors.is_empty());
        assert_eq!(out, "9\n4\n4\n");
    }

    #[test]
    fn parentheses_and_negation() {
        let (out, errors) = run(&["var x number = 4",
                                  "println -(x + 1) * 2",
                                  "println -x",
                                  "println 3 - -2.5"]);

        assert!(errors.is_empty());
        assert_eq!(out, "-10\n-4\n5.5\n");
    }

    #[test]
    fn float_division_by_zero_is_not_an_error() {
        let (out, errors) = run(&["println 1 / 0", "println -1 / 0"]);

        assert!(errors.is_empty());
        assert_eq!(out, "inf\n-inf\n");
    }

    #[test]
    fn overflow_skips_only_the_failing_statement() {
        let (out, errors) = run(&["var big number = 9223372036854775807",
                                  "println big + 1",
                                  "println big * 2",
                                  "println 1"]);

        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], RuntimeError::Overflow { line: 2, column: 1 }));
        assert_eq!(Error::from(errors[1].clone()).line(), 3);
        assert_eq!(out, "1\n");
    }

    #[test]
    fn mixed_operands_promote_to_float() {
        let (out, errors) = run(&["println 3 + 2.0", "println 2.5 * 2", "println 7 / 2"]);

        assert!(errors.is_empty());
        assert_eq!(out, "5\n5\n3.5\n");
    }
}
