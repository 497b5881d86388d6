//! Test helpers shared by the parser and printer suites.

use crate::ast::Query;
use crate::diagnostics::{ErrorKind, SyntaxError};
use crate::parser::{ParseOptions, parse, parse_with};
use crate::printer::{AstPrinter, serialize};

/// Parses `input`, panicking with the rendered error if it is invalid.
pub fn expect_valid(input: &str) -> Query {
    match parse(input) {
        Ok(query) => query,
        Err(err) => panic!(
            "expected valid query, got error:\n{}",
            err.printer(input).render()
        ),
    }
}

/// Canonical text of a valid query. Also checks that the text parses back to
/// an equal tree.
pub fn expect_canonical(input: &str) -> String {
    let query = expect_valid(input);
    let text = serialize(&query);
    let reparsed = expect_valid(&text);
    assert_eq!(query, reparsed, "canonical text does not round-trip: {text}");
    text
}

pub fn expect_ast(input: &str) -> String {
    AstPrinter::new(&expect_valid(input)).dump()
}

pub fn expect_ast_with_spans(input: &str) -> String {
    AstPrinter::new(&expect_valid(input)).with_spans(true).dump()
}

pub fn expect_error(input: &str) -> SyntaxError {
    expect_error_with(input, ParseOptions::default())
}

pub fn expect_error_with(input: &str, options: ParseOptions) -> SyntaxError {
    match parse_with(input, options) {
        Ok(query) => panic!("expected error, got valid query: {}", serialize(&query)),
        Err(err) => err,
    }
}

pub fn expect_kind(input: &str, kind: ErrorKind) -> SyntaxError {
    let err = expect_error(input);
    assert_eq!(err.kind(), kind, "unexpected error kind: {}", err.message());
    err
}

/// Rendered diagnostic for an invalid query.
pub fn expect_invalid(input: &str) -> String {
    expect_error(input).printer(input).render()
}

/// Snapshot test for canonical output.
#[macro_export]
macro_rules! shot_canonical {
    ($query:expr, @$snapshot:literal) => {{
        let output = $crate::test_utils::expect_canonical($query);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot test for the AST dump.
#[macro_export]
macro_rules! shot_ast {
    ($query:expr, @$snapshot:literal) => {{
        let output = $crate::test_utils::expect_ast($query);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}

/// Snapshot test for a rendered error.
#[macro_export]
macro_rules! shot_error {
    ($query:expr, @$snapshot:literal) => {{
        let output = $crate::test_utils::expect_invalid($query);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}
