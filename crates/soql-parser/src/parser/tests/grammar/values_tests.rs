use crate::ast::{Expr, ValueKind};
use crate::diagnostics::ErrorKind;
use crate::test_utils::{expect_kind, expect_valid};

fn compared_value(input: &str) -> ValueKind {
    match expect_valid(input).where_clause {
        Some(Expr::Comparison(cmp)) => cmp.value.kind,
        other => panic!("expected a single comparison, got {other:?}"),
    }
}

#[test]
fn literal_kinds() {
    let input = "select Id from X where Active = true and Amount >= -1.50 and Closed = NULL and D = 2024-01-15 and T = 2024-01-15T10:30:00+05:30 and At < 10:30:00.000Z and C = LAST_N_DAYS:30 and Y = today and Id = :acct";

    crate::shot_canonical!(
        input,
        @"SELECT Id FROM X WHERE Active = TRUE AND Amount >= -1.50 AND Closed = NULL AND D = 2024-01-15 AND T = 2024-01-15T10:30:00+05:30 AND At < 10:30:00Z AND C = LAST_N_DAYS:30 AND Y = TODAY AND Id = :acct"
    );
}

#[test]
fn literal_dump() {
    crate::shot_ast!(
        "select Id from X where D = 2024-01-15 and N = last_n_days:7 and B = false",
        @r"
    Query
      Select
        Field Id
      From X
      Where
        And
          And
            Comparison =
              Field D
              Date 2024-01-15
            Comparison =
              Field N
              DateFunction LAST_N_DAYS:7
          Comparison =
            Field B
            Boolean FALSE
    "
    );
}

#[test]
fn number_keeps_lexeme() {
    assert_eq!(
        compared_value("select Id from X where Amount = 007.50"),
        ValueKind::Number("007.50".to_string())
    );
}

#[test]
fn number_radix_and_special_forms() {
    crate::shot_canonical!(
        "select Id from X where A = 0x1F and B = -Infinity and C = nan and D = 0b101 and E = 0o17",
        @"SELECT Id FROM X WHERE A = 0x1F AND B = -Infinity AND C = nan AND D = 0b101 AND E = 0o17"
    );
    assert_eq!(
        compared_value("select Id from X where A = -0XFF"),
        ValueKind::Number("-0XFF".to_string())
    );
}

#[test]
fn limit_rejects_non_decimal_number() {
    let err = expect_kind("select Id from X limit 0x10", ErrorKind::InvalidLimitOffset);
    assert_eq!(err.found(), "`0x10`");
}

#[test]
fn datetime_fraction_and_utc() {
    crate::shot_canonical!(
        "select Id from X where T = 2024-01-15T10:30:00.5Z",
        @"SELECT Id FROM X WHERE T = 2024-01-15T10:30:00.500Z"
    );
}

#[test]
fn datetime_equality_is_by_instant() {
    let utc = expect_valid("select Id from X where T = 2024-01-15T10:30:00Z");
    let shifted = expect_valid("select Id from X where T = 2024-01-15T16:00:00+05:30");
    assert_eq!(utc, shifted);
}

#[test]
fn datetime_requires_zone() {
    let err = expect_kind(
        "select Id from X where T = 2024-01-15T10:30:00",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.found(), "`2024-01-15T10:30:00`");
}

#[test]
fn malformed_date_literals() {
    let err = expect_kind(
        "select Id from X where CreatedDate > 2024-01-01T10:00Z",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), "`YYYY-MM-DD` or `YYYY-MM-DDThh:mm:ss` with a zone");
    assert_eq!(err.found(), "`2024-01-01T10:00Z`");
    assert_eq!(err.position(), 37);

    let err = expect_kind("select Id from X where D = 2024-1-1", ErrorKind::InvalidLiteralShape);
    assert_eq!(err.found(), "`2024-1-1`");
}

#[test]
fn invalid_calendar_date() {
    let err = expect_kind(
        "select Id from X where D = 2024-02-30",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), "a valid calendar date");
    assert_eq!(err.position(), 27);
}

#[test]
fn invalid_time() {
    let err = expect_kind("select Id from X where T = 25:00:00", ErrorKind::InvalidLiteralShape);
    assert_eq!(err.expected(), "a valid time of day");
}

#[test]
fn string_escapes() {
    let input = r"select Id from X where Name = 'O\'Brien\n' and Name like 'A\_%' and City = 'é'";

    crate::shot_canonical!(
        input,
        @r"SELECT Id FROM X WHERE Name = 'O\'Brien\n' AND Name LIKE 'A\_%' AND City = 'é'"
    );

    assert_eq!(
        compared_value(r"select Id from X where Name = 'O\'Brien\n'"),
        ValueKind::String("O'Brien\n".to_string())
    );
}

#[test]
fn numeric_and_uppercase_escapes() {
    assert_eq!(
        compared_value(r"select Id from X where Name = '\x41\101\u{1F600}\u00e9\v\N\T'"),
        ValueKind::String("AA\u{1F600}\u{e9}\u{b}\n\t".to_string())
    );
    crate::shot_canonical!(
        r"select Id from X where Name = '\x41\v\B'",
        @r"SELECT Id FROM X WHERE Name = 'A\v\b'"
    );
}

#[test]
fn malformed_numeric_escapes() {
    let err = expect_kind(r"select Id from X where Name = '\x4'", ErrorKind::InvalidLiteralShape);
    assert_eq!(err.expected(), r"`\x` followed by two hex digits");

    let err = expect_kind(r"select Id from X where Name = '\18'", ErrorKind::InvalidLiteralShape);
    assert_eq!(err.expected(), r"three octal digits after `\`");

    let err = expect_kind(
        r"select Id from X where Name = '\u{110000}'",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), r"`\u{` followed by one to six hex digits and `}`");
}

#[test]
fn invalid_escape() {
    let err = expect_kind(
        r"select Id from X where Name = 'a\qb'",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), "a valid escape sequence");
}

#[test]
fn short_unicode_escape() {
    let err = expect_kind(
        r"select Id from X where Name = '\u12'",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), r"`\u` followed by four hex digits");
}

#[test]
fn date_function_argument() {
    let ValueKind::DateFunction(func) = compared_value("select Id from X where C = NEXT_N_WEEKS:2")
    else {
        panic!("expected a date function");
    };
    assert_eq!(func.name, "NEXT_N_WEEKS");
    assert_eq!(func.n, Some(2));
}

#[test]
fn date_function_missing_argument() {
    let err = expect_kind(
        "select Id from X where C = LAST_N_DAYS",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), "`LAST_N_DAYS:N`");

    // detached `:N` does not count
    let err = expect_kind(
        "select Id from X where C = LAST_N_DAYS :3",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), "`LAST_N_DAYS:N`");
}

#[test]
fn date_function_unexpected_argument() {
    let err = expect_kind("select Id from X where C = TODAY:3", ErrorKind::InvalidLiteralShape);
    assert_eq!(err.expected(), "no argument after `TODAY`");
    assert_eq!(err.found(), "`:`");
}

#[test]
fn date_function_malformed_argument() {
    let err = expect_kind(
        "select Id from X where C = LAST_N_DAYS:-3",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.expected(), "non-negative integer after `LAST_N_DAYS:`");
    assert_eq!(err.found(), "`-3`");

    let err = expect_kind(
        "select Id from X where C = LAST_N_DAYS: 3",
        ErrorKind::InvalidLiteralShape,
    );
    assert_eq!(err.found(), "`3`");
}

#[test]
fn value_required_after_operator() {
    let err = expect_kind("select Id from X where A = Name", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "value");
    assert_eq!(err.found(), "`Name`");
}
