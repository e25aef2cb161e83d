/// Parser state, result types and the parsing entry point.
///
/// Owns the token cursor, the symbol arena under construction, the stack of
/// open blocks and the collected errors.
pub mod core;

/// Block and statement list parsing.
///
/// Opens a symbol table per block, recovers from statement errors and checks
/// brace balance.
pub mod block;

/// Statement parsing.
///
/// Handles declarations, assignments, `print`/`println` and the classification
/// of expressions by their leading token.
pub mod statement;

/// Arithmetic expression parsing.
///
/// Implements the right-recursive `NumExpression`, `Term` and `Factor` rules.
pub mod numeric;

/// String expression parsing.
///
/// Implements `+`-chained concatenation of string literals and textual
/// variables.
pub mod textual;
