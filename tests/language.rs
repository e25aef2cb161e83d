use std::fs;

use kab::{
    error::{Error, ParseError, RuntimeError},
    interpret,
    interpreter::value::{DataKind, Number, Value},
};
use walkdir::WalkDir;

#[test]
fn scripts_match_expected_output() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| {
                                                  e.path().extension().is_some_and(|ext| ext == "kab")
                                              })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });

        count += 1;
        let mut out = Vec::new();
        if let Err(errors) = interpret(&source, &mut out) {
            panic!("Script {path:?} failed:\n{}", render(&errors));
        }
        assert_eq!(String::from_utf8(out).unwrap(), expected, "output of {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn render(errors: &[Error]) -> String {
    errors.iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n")
}

fn assert_output(src: &str, expected: &str) {
    let mut out = Vec::new();
    if let Err(errors) = interpret(src, &mut out) {
        panic!("Script failed:\n{}", render(&errors));
    }
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

fn assert_failure(src: &str) -> Vec<Error> {
    let mut out = Vec::new();
    match interpret(src, &mut out) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(errors) => errors,
    }
}

#[test]
fn declaration_and_arithmetic() {
    assert_output("var x number = 2\nvar y number = 3\nprintln x * y + 1", "7\n");
    assert_output("println 3 + 2", "5\n");
    assert_output("println 3 + 2.0", "5\n");
    assert_output("println 7 / 2", "3.5\n");
    assert_output("println 10 - 4 - 3", "9\n");
    assert_output("println 8 / 4 / 2", "4\n");
    assert_output("println 2 + 3 * 4", "14\n");
    assert_output("println (2 + 3) * 4", "20\n");
}

#[test]
fn integer_and_float_results() {
    let mut out = Vec::new();
    let program = interpret("var a number = 3 + 2\nvar b number = 3 + 2.0\nvar c number = 6 / 3",
                            &mut out).unwrap();
    let scopes = &program.scopes;
    let root = program.root.scope;
    let value = |name: &str| scopes.symbol(scopes.get(root, name).unwrap()).value.clone();

    assert_eq!(value("a"), Value::Numeric(Number::Integer(5)));
    assert_eq!(value("b"), Value::Numeric(Number::from(5.0)));
    assert_eq!(value("c"), Value::Numeric(Number::from(2.0)));
}

#[test]
fn string_concatenation() {
    assert_output("println \"a\" + \"b\" + \"c\"", "abc\n");
    assert_output("var s string = \"x\"\ns = s + \"y\"\nprintln s + \"!\"", "xy!\n");
    assert_output("var s string\nprint \"[\"\nprint s\nprintln \"]\"", "[]\n");
}

#[test]
fn compound_assignment() {
    assert_output("var n number = 2\nn += 3\nprintln n", "5\n");
    assert_output("var s string = \"ab\"\ns += \"cd\"\nprintln s", "abcd\n");
}

#[test]
fn print_forms() {
    assert_output("print 1\nprint 2\nprintln", "12\n");
    assert_output("println\nprintln", "\n\n");
    assert_output("print", "");
}

#[test]
fn comments_are_ignored() {
    assert_output("# a comment with ~ and \" in it\nprintln 1 # trailing\n  # indented", "1\n");
}

#[test]
fn shadowing_in_nested_blocks() {
    let src = "var x number = 1
{
  var x string = \"inner\"
  println x
  {
    println x
  }
}
println x";

    assert_output(src, "inner\ninner\n1\n");
}

#[test]
fn inner_blocks_update_outer_variables() {
    assert_output("var x number = 1\n{\nx = x + 1\n}\nprintln x", "2\n");
}

#[test]
fn initializer_sees_the_outer_binding() {
    assert_output("var x number = 5\n{\nvar x number = x + 1\nprintln x\n}\nprintln x",
                  "6\n5\n");
}

#[test]
fn sibling_blocks_are_independent() {
    assert_output("{\nvar a number = 1\nprintln a\n}\n{\nvar a number = 2\nprintln a\n}",
                  "1\n2\n");

    let errors = assert_failure("{\nvar a number = 1\n}\n{\nprintln a\n}");
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0],
                     Error::Parse(ParseError::UndeclaredVariable { name, line: 5, .. }) if name == "a"));
}

#[test]
fn same_block_redeclaration_is_error() {
    let errors = assert_failure("var x number\nvar x string");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0],
                     Error::Parse(ParseError::Redeclaration { line: 2, column: 5, .. })));
}

#[test]
fn undeclared_assignment_is_single_error() {
    let mut out = Vec::new();
    let errors = interpret("y = 5", &mut out).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 1);
    assert_eq!(errors[0].column(), 1);
    assert!(out.is_empty());
}

#[test]
fn kind_mismatches_are_parse_errors() {
    let errors = assert_failure("var x number = \"text\"");
    assert!(matches!(errors[0],
                     Error::Parse(ParseError::KindMismatch { expected: DataKind::Numeric,
                                                             actual: DataKind::Textual,
                                                             .. })));

    let errors = assert_failure("var s string\nvar n number = 1\ns = n");
    assert!(matches!(errors[0], Error::Parse(ParseError::KindMismatch { line: 3, .. })));

    let errors = assert_failure("var s string\nprintln 1 + s");
    assert!(matches!(errors[0], Error::Parse(ParseError::KindMismatch { line: 2, column: 13, .. })));
}

#[test]
fn errors_do_not_stop_parsing() {
    let errors = assert_failure("println )\nz = 1\nprintln 1 +\nvar ok number = 1");

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.iter().map(Error::line).collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn failed_initializer_still_declares_the_variable() {
    let errors = assert_failure("var x number = \"a\"\nprintln x\nx = 2\nx += 1");

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::Parse(ParseError::KindMismatch { line: 1, .. })));
}

#[test]
fn programs_with_errors_produce_no_output() {
    let mut out = Vec::new();
    let errors = interpret("println 1\nprintln x", &mut out).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(out.is_empty());
}

#[test]
fn brace_balance() {
    let errors = assert_failure("{\nprintln 1");
    assert!(matches!(errors[..], [Error::Parse(ParseError::MissingClosingBrace { .. })]));

    let errors = assert_failure("println 1\n}");
    assert!(matches!(errors[..],
                     [Error::Parse(ParseError::UnmatchedClosingBrace { line: 2, column: 1 })]));
}

#[test]
fn malformed_declaration_skips_the_rest_of_the_block() {
    let errors = assert_failure("{\nvar 1 number\nz = 1\n{\nw = 2\n}\n}\nq = 3");

    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0],
                     Error::Parse(ParseError::MalformedDeclaration { line: 2, column: 5, .. })));
    assert!(matches!(&errors[1],
                     Error::Parse(ParseError::UndeclaredVariable { name, .. }) if name == "q"));
}

#[test]
fn lexical_errors_are_reported_per_line() {
    let errors = assert_failure("println 1 ~ 2\nprintln \"open\nprintln 3");

    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], Error::Lex(_)));
    assert_eq!((errors[0].line(), errors[0].column()), (1, 11));
    assert_eq!(errors[1].line(), 2);
}

#[test]
fn reserved_words_are_not_statements() {
    let errors = assert_failure("if");
    assert!(matches!(errors[0], Error::Parse(ParseError::UnexpectedToken { .. })));

    let errors = assert_failure("var for number");
    assert!(matches!(errors[0], Error::Parse(ParseError::MalformedDeclaration { .. })));
}

#[test]
fn overflow_is_a_runtime_error() {
    let mut out = Vec::new();
    let errors = interpret("var m number = 9223372036854775807\nm += 1\nprintln m", &mut out).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], Error::Runtime(RuntimeError::Overflow { line: 2, column: 1 })));
    assert_eq!(String::from_utf8(out).unwrap(), "9223372036854775807\n");
}

#[test]
fn oversized_literals_are_rejected() {
    let errors = assert_failure("println 99999999999999999999");
    assert!(matches!(errors[0], Error::Parse(ParseError::LiteralTooLarge { .. })));
}

#[test]
fn smallest_integer_literal_is_accepted() {
    assert_output("println -9223372036854775808", "-9223372036854775808\n");
    assert_output("var m number = -9223372036854775808\nprintln m + 1", "-9223372036854775807\n");

    let errors = assert_failure("println -9223372036854775809");
    assert!(matches!(&errors[0],
                     Error::Parse(ParseError::LiteralTooLarge { literal, .. }) if literal == "-9223372036854775809"));
}

#[test]
fn error_messages_name_the_position() {
    let errors = assert_failure("\n  y = 5");

    assert_eq!(errors[0].to_string(),
               "Error on line 2, column 1: Undeclared variable 'y'.");
}
