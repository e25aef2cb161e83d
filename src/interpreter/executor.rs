/// Executor state and statement execution.
///
/// Walks the blocks of a program, keeps the stack of executing blocks, stores
/// values into symbols and writes program output.
pub mod core;

/// Arithmetic evaluation.
///
/// Evaluates `+ - * /` chains from the right with integer to float promotion and
/// overflow detection.
pub mod numeric;

/// String evaluation.
///
/// Concatenates literals and the current values of textual variables.
pub mod textual;
