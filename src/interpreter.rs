/// The executor module runs parsed programs.
///
/// The executor walks the blocks of a program in order, evaluates numeric and
/// string expressions, stores values into the symbols the parser bound, and
/// writes `print`/`println` output. It never changes the tree itself.
///
/// # Responsibilities
/// - Keeps the stack of executing blocks and checks that every stored or read
///   symbol is visible from the current one.
/// - Evaluates arithmetic with integer to float promotion and reports integer
///   overflow.
/// - Collects runtime errors, skipping only the failing statement.
pub mod executor;
/// The lexer module tokenizes source lines.
///
/// The lexer reads one source line at a time and splits it into tokens using
/// a table of token definitions, choosing the longest match and breaking ties
/// by priority. Identifiers are reclassified as keywords afterwards.
///
/// # Responsibilities
/// - Converts each line into tokens with kind, text, line and column.
/// - Skips whitespace and the bodies of `#` comments.
/// - Reports lexical errors for unrecognized or unterminated text.
pub mod lexer;
/// The cursor module feeds tokens to the parser.
///
/// Joins the tokens of all lines into one stream with newline tokens between
/// lines and an end-of-input sentinel at the end, and supports one-token
/// lookahead and pushback.
pub mod cursor;
/// The parser module builds the AST and the symbol arena from tokens.
///
/// The parser is recursive descent over the token stream. It opens a symbol
/// table per block, declares variables, and resolves every variable reference
/// to its symbol while parsing, checking data kinds on the way.
///
/// # Responsibilities
/// - Converts tokens into statements, blocks and expressions.
/// - Reports syntax errors and scope errors with line and column.
/// - Recovers after errors so that one run reports as many as possible.
pub mod parser;
/// The scope module stores symbols per block.
///
/// An arena of symbol tables linked to their enclosing table, and of the
/// symbols themselves, addressed by stable handles.
pub mod scope;
/// The value module defines the runtime data types.
///
/// Declares the two data kinds of the language and their values: numbers,
/// backed by 64-bit integers or floats, and strings.
pub mod value;
