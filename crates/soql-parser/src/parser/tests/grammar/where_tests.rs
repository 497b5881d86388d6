use crate::ast::{Expr, InValues, ValueKind};
use crate::diagnostics::ErrorKind;
use crate::test_utils::{expect_canonical, expect_kind, expect_valid};

fn where_of(input: &str) -> Expr {
    expect_valid(input)
        .where_clause
        .expect("query has a WHERE clause")
}

#[test]
fn like_with_limit() {
    let input = "select Id, Name from Contact where Name like 'A%' limit 10";

    let query = expect_valid(input);
    assert!(matches!(query.where_clause, Some(Expr::Like(ref like)) if !like.negated));
    assert_eq!(query.limit.as_ref().and_then(|l| l.as_literal()), Some(10));

    crate::shot_ast!(input, @r"
    Query
      Select
        Field Id
        Field Name
      From Contact
      Where
        Like
          Field Name
          String 'A%'
      Limit 10
    ");
}

#[test]
fn in_subquery() {
    let input = "select Id from Contact where Id in (select ContactId from Case)";

    let Expr::In(list) = where_of(input) else {
        panic!("expected IN expression");
    };
    assert!(matches!(list.values, InValues::Query(_)));

    crate::shot_ast!(input, @r"
    Query
      Select
        Field Id
      From Contact
      Where
        In IN
          Field Id
          Query
            Select
              Field ContactId
            From Case
    ");
}

#[test]
fn and_binds_tighter_than_or() {
    let input = "select Id from X where A = 1 OR B = 2 AND C = 3";

    let Expr::Or(or) = where_of(input) else {
        panic!("expected OR at the top");
    };
    assert!(matches!(*or.left, Expr::Comparison(_)));
    assert!(matches!(*or.right, Expr::And(_)));

    crate::shot_ast!(input, @r"
    Query
      Select
        Field Id
      From X
      Where
        Or
          Comparison =
            Field A
            Number 1
          And
            Comparison =
              Field B
              Number 2
            Comparison =
              Field C
              Number 3
    ");
    crate::shot_canonical!(input, @"SELECT Id FROM X WHERE A = 1 OR B = 2 AND C = 3");
}

#[test]
fn or_is_left_associative() {
    let Expr::Or(or) = where_of("select Id from X where A = 1 or B = 2 or C = 3") else {
        panic!("expected OR at the top");
    };
    assert!(matches!(*or.left, Expr::Or(_)));
    assert!(matches!(*or.right, Expr::Comparison(_)));
}

#[test]
fn not_binds_tighter_than_and() {
    crate::shot_ast!("select Id from X where not A = 1 and B = 2", @r"
    Query
      Select
        Field Id
      From X
      Where
        And
          Not
            Comparison =
              Field A
              Number 1
          Comparison =
            Field B
            Number 2
    ");
}

#[test]
fn parentheses_override_precedence() {
    let input = "select Id from X where (A = 1 or B = 2) and C = 3";

    let Expr::And(and) = where_of(input) else {
        panic!("expected AND at the top");
    };
    assert!(matches!(*and.left, Expr::Paren(_)));

    crate::shot_canonical!(input, @"SELECT Id FROM X WHERE (A = 1 OR B = 2) AND C = 3");
}

#[test]
fn double_negation() {
    crate::shot_canonical!(
        "select Id from X where not not A = 1",
        @"SELECT Id FROM X WHERE NOT NOT A = 1"
    );
}

#[test]
fn negated_like_and_in() {
    crate::shot_canonical!(
        "select Id from X where Name not like 'A%' and Id not in ('1', '2')",
        @"SELECT Id FROM X WHERE Name NOT LIKE 'A%' AND Id NOT IN ('1', '2')"
    );
}

#[test]
fn includes_and_excludes() {
    crate::shot_canonical!(
        "select Id from X where Tags__c includes ('a;b', 'c') or Tags__c excludes ('d')",
        @"SELECT Id FROM X WHERE Tags__c INCLUDES ('a;b', 'c') OR Tags__c EXCLUDES ('d')"
    );
}

#[test]
fn includes_rejects_subquery() {
    let err = expect_kind(
        "select Id from X where Tags__c includes (select Id from Y)",
        ErrorKind::UnexpectedToken,
    );
    assert_eq!(err.expected(), "value");
    assert_eq!(err.found(), "`select`");
}

#[test]
fn in_list_accepts_bind_variables() {
    crate::shot_canonical!(
        "select Id from X where Id in (:first, 'b', :last)",
        @"SELECT Id FROM X WHERE Id IN (:first, 'b', :last)"
    );
}

#[test]
fn in_bind_without_parentheses() {
    crate::shot_canonical!(
        "select Id from X where Id in :ids and Tags__c includes :tags and Type not in :skip",
        @"SELECT Id FROM X WHERE Id IN :ids AND Tags__c INCLUDES :tags AND Type NOT IN :skip"
    );

    let Expr::In(list) = where_of("select Id from X where Id in :ids") else {
        panic!("expected IN expression");
    };
    let InValues::Bind(value) = list.values else {
        panic!("expected bind variable");
    };
    assert_eq!(value.kind, ValueKind::Bind("ids".into()));
}

#[test]
fn in_requires_list_or_bind() {
    let err = expect_kind("select Id from X where Id in 'a'", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`(` or bind variable after `IN`");
    assert_eq!(err.found(), "`'a'`");
}

#[test]
fn like_accepts_bind_variable() {
    crate::shot_canonical!(
        "select Id from X where Name like :pattern",
        @"SELECT Id FROM X WHERE Name LIKE :pattern"
    );
}

#[test]
fn like_requires_string() {
    let err = expect_kind("select Id from X where Name like 5", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "string pattern after `LIKE`");
}

#[test]
fn comparison_operators() {
    crate::shot_canonical!(
        "select Id from X where A=1 and B!=2 and C<3 and D<=4 and E>5 and F>=6",
        @"SELECT Id FROM X WHERE A = 1 AND B != 2 AND C < 3 AND D <= 4 AND E > 5 AND F >= 6"
    );
}

#[test]
fn function_call_operand() {
    crate::shot_canonical!(
        "select Id from Opportunity where CALENDAR_YEAR(CreatedDate) = 2024",
        @"SELECT Id FROM Opportunity WHERE CALENDAR_YEAR(CreatedDate) = 2024"
    );
}

#[test]
fn missing_operator() {
    let err = expect_kind("select Id from X where Name 'x'", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "comparison operator");
    assert_eq!(err.found(), "`'x'`");
}

#[test]
fn not_must_precede_like_or_in() {
    let err = expect_kind("select Id from X where Name not = 'x'", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`LIKE` or `IN` after `NOT`");
    assert_eq!(err.found(), "`=`");
}

#[test]
fn semi_join_must_select_one_field() {
    let err = expect_kind(
        "select Id from X where Id in (select Id, Name from Contact)",
        ErrorKind::InvalidSemiJoin,
    );
    assert_eq!(err.position(), 37);
    assert_eq!(err.found(), "2 select items");

    let err = expect_kind(
        "select Id from X where Id in (select * from Contact)",
        ErrorKind::InvalidSemiJoin,
    );
    assert_eq!(err.found(), "`*`");
}

#[test]
fn semi_join_with_aggregate() {
    let res = expect_canonical("select Id from X where Id not in (select max(Id) from Y)");
    insta::assert_snapshot!(res, @"SELECT Id FROM X WHERE Id NOT IN (SELECT max(Id) FROM Y)");
}

#[test]
fn deeply_parenthesised_condition() {
    let input = format!("select Id from X where {}A = 1{}", "(".repeat(10), ")".repeat(10));
    let res = expect_canonical(&input);
    assert_eq!(
        res,
        format!("SELECT Id FROM X WHERE {}A = 1{}", "(".repeat(10), ")".repeat(10))
    );
}
