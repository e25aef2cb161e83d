use std::io::Write;

use tracing::{debug, trace, warn};

use crate::{
    ast::{Block, Expression, Program, Statement, Statements},
    error::RuntimeError,
    interpreter::{
        scope::{ScopeId, Scopes, SymbolId},
        value::Value,
    },
};

/// Result type used by the executor.
///
/// All execution routines return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Runs parsed programs.
///
/// Output goes to the writer given at construction. Runtime errors are
/// collected: the failing statement is skipped and execution continues with
/// the next statement of the same block. Fatal errors stop the whole run.
///
/// # Example
/// ```
/// use kab::{interpreter::executor::core::Executor, parse};
///
/// let mut program = parse(&["var x number = 6", "println x * 7"]).program;
/// let mut out = Vec::new();
///
/// let mut executor = Executor::new(&mut out);
/// executor.execute(&mut program);
///
/// assert!(executor.errors().is_empty());
/// assert_eq!(String::from_utf8(out).unwrap(), "42\n");
/// ```
pub struct Executor<W: Write> {
    out:    W,
    /// Tables of the blocks currently executing, innermost last.
    blocks: Vec<ScopeId>,
    /// Position of the statement being executed, for error reports.
    at:     (usize, usize),
    errors: Vec<RuntimeError>,
}

impl<W: Write> Executor<W> {
    /// Creates an executor writing program output to `out`.
    pub const fn new(out: W) -> Self {
        Self { out,
               blocks: Vec::new(),
               at: (1, 1),
               errors: Vec::new() }
    }

    /// Executes `program`, updating the values of its symbols.
    ///
    /// Errors are available from [`Executor::errors`] afterwards.
    pub fn execute(&mut self, program: &mut Program) {
        let Program { root, scopes } = program;

        debug!(tables = scopes.scopes().count(), "executing program");
        let result = self.execute_block(root, scopes).and_then(|()| self.flush());
        if let Err(e) = result {
            warn!(error = %e, "execution aborted");
            self.errors.push(e);
        }
        debug!(errors = self.errors.len(), "executed program");
    }

    /// The runtime errors collected so far.
    #[must_use]
    pub fn errors(&self) -> &[RuntimeError] {
        &self.errors
    }

    /// Consumes the executor, returning the collected runtime errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<RuntimeError> {
        self.errors
    }

    /// Executes a block inside its own table.
    ///
    /// # Errors
    /// `MissingBlock` if the block's table is not part of `scopes`.
    fn execute_block(&mut self, block: &Block, scopes: &mut Scopes) -> EvalResult<()> {
        if !scopes.contains(block.scope) {
            return Err(RuntimeError::MissingBlock { line:   block.line,
                                                    column: block.column, });
        }

        trace!(line = block.line, column = block.column, "entering block");
        self.blocks.push(block.scope);
        let result = self.execute_statements(&block.statements, scopes);
        self.blocks.pop();
        trace!(line = block.line, column = block.column, "leaving block");

        result
    }

    /// Executes statements in order, skipping the ones that fail.
    ///
    /// # Errors
    /// Only fatal errors are returned; all others are recorded.
    fn execute_statements(&mut self, statements: &Statements, scopes: &mut Scopes) -> EvalResult<()> {
        for statement in &statements.list {
            if let Err(e) = self.execute_statement(statement, scopes) {
                if e.is_fatal() {
                    return Err(e);
                }
                trace!(error = %e, "statement skipped");
                self.errors.push(e);
            }
        }
        Ok(())
    }

    fn execute_statement(&mut self, statement: &Statement, scopes: &mut Scopes) -> EvalResult<()> {
        if let Some(position) = statement.position() {
            self.at = position;
            trace!(line = position.0, column = position.1, "executing statement");
        }

        match statement {
            Statement::Null => Ok(()),
            Statement::Var { symbol,
                             name,
                             kind,
                             initializer,
                             .. } => {
                let value = match initializer {
                    Some(expression) => self.evaluate(expression, scopes)?,
                    None => kind.default_value(),
                };
                self.store(scopes, *symbol, name, value)
            },
            Statement::Assign { symbol,
                                name,
                                compound,
                                expression,
                                .. } => {
                let value = self.evaluate(expression, scopes)?;
                let value = if *compound {
                    self.combine(&scopes.symbol(*symbol).value, value)?
                } else {
                    value
                };
                self.store(scopes, *symbol, name, value)
            },
            Statement::Print { payload, .. } => self.print(payload.as_ref(), scopes, false),
            Statement::Println { payload, .. } => self.print(payload.as_ref(), scopes, true),
            Statement::Block(block) => self.execute_block(block, scopes),
        }
    }

    /// Evaluates an expression of either kind.
    pub(super) fn evaluate(&self, expression: &Expression, scopes: &Scopes) -> EvalResult<Value> {
        Ok(match expression {
               Expression::Numeric(e) => Value::Numeric(self.evaluate_num(e, scopes)?),
               Expression::Textual(e) => Value::Textual(self.evaluate_string(e, scopes)?),
           })
    }

    /// Applies `+=`: numeric addition or string append.
    fn combine(&self, current: &Value, value: Value) -> EvalResult<Value> {
        match (current, value) {
            (Value::Numeric(a), Value::Numeric(b)) => {
                let sum = a.checked_add(b).ok_or_else(|| self.overflow())?;
                Ok(Value::Numeric(sum))
            },
            (Value::Textual(a), Value::Textual(b)) => Ok(Value::Textual(format!("{a}{b}"))),
            (_, value) => Ok(value),
        }
    }

    /// Stores `value` into `symbol`.
    ///
    /// # Errors
    /// `InvalidAssignmentTarget` if the symbol is not visible from the
    /// executing block or has a different kind than `value`.
    fn store(&self,
             scopes: &mut Scopes,
             symbol: SymbolId,
             name: &str,
             value: Value)
             -> EvalResult<()> {
        let (line, column) = self.at;
        if !scopes.is_visible(self.current_scope(), symbol) {
            return Err(RuntimeError::InvalidAssignmentTarget { name: name.to_string(),
                                                               details:
                                                                   "not visible from this block".to_string(),
                                                               line,
                                                               column });
        }

        let target = scopes.symbol_mut(symbol);
        if target.kind != value.kind() {
            return Err(RuntimeError::InvalidAssignmentTarget { name: name.to_string(),
                                                               details: format!("cannot store a {} value in a {} variable",
                                                                                value.kind(),
                                                                                target.kind),
                                                               line,
                                                               column });
        }

        target.value = value;
        Ok(())
    }

    /// Reads the current value of a variable.
    ///
    /// # Errors
    /// `InvalidReference` if the symbol is not visible from the executing
    /// block.
    pub(super) fn read<'a>(&self,
                           scopes: &'a Scopes,
                           symbol: SymbolId,
                           name: &str,
                           (line, column): (usize, usize))
                           -> EvalResult<&'a Value> {
        if !scopes.is_visible(self.current_scope(), symbol) {
            return Err(RuntimeError::InvalidReference { name: name.to_string(),
                                                        details: "not visible from this block".to_string(),
                                                        line,
                                                        column });
        }
        Ok(&scopes.symbol(symbol).value)
    }

    fn print(&mut self,
             payload: Option<&Expression>,
             scopes: &Scopes,
             newline: bool)
             -> EvalResult<()> {
        let text = match payload {
            Some(expression) => self.evaluate(expression, scopes)?.to_string(),
            None => String::new(),
        };
        let result = if newline {
            writeln!(self.out, "{text}")
        } else {
            write!(self.out, "{text}")
        };
        result.map_err(|e| self.output_error(&e))
    }

    fn flush(&mut self) -> EvalResult<()> {
        self.out.flush().map_err(|e| self.output_error(&e))
    }

    fn output_error(&self, e: &std::io::Error) -> RuntimeError {
        RuntimeError::Output { message: e.to_string(),
                               line:    self.at.0,
                               column:  self.at.1, }
    }

    /// An `Overflow` error at the current statement.
    pub(super) const fn overflow(&self) -> RuntimeError {
        RuntimeError::Overflow { line:   self.at.0,
                                 column: self.at.1, }
    }

    fn current_scope(&self) -> ScopeId {
        self.blocks.last().copied().unwrap_or(ScopeId::ROOT)
    }
}
