use crate::ast::CountValue;
use crate::diagnostics::ErrorKind;
use crate::test_utils::{expect_kind, expect_valid};

#[test]
fn from_alias() {
    crate::shot_canonical!(
        "select Id from Account acc where acc.Name = 'x'",
        @"SELECT Id FROM Account acc WHERE acc.Name = 'x'"
    );
}

#[test]
fn from_requires_object() {
    let err = expect_kind("select Id from where", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "object name after `FROM`");
    assert_eq!(err.found(), "`where`");
}

#[test]
fn group_by_and_having() {
    let input = "select LeadSource, count(Name) cnt from Lead group by LeadSource having count(Name) > 100";

    crate::shot_canonical!(
        input,
        @"SELECT LeadSource, count(Name) cnt FROM Lead GROUP BY LeadSource HAVING count(Name) > 100"
    );
    crate::shot_ast!(input, @r"
    Query
      Select
        Field LeadSource
        Call count as cnt
          Field Name
      From Lead
      GroupBy
        Field LeadSource
      Having
        Comparison >
          Call count
            Field Name
          Number 100
    ");
}

#[test]
fn group_by_function() {
    crate::shot_canonical!(
        "select CALENDAR_YEAR(CreatedDate), Type, count(Id) from Opportunity group by CALENDAR_YEAR(CreatedDate), Type",
        @"SELECT CALENDAR_YEAR(CreatedDate), Type, count(Id) FROM Opportunity GROUP BY CALENDAR_YEAR(CreatedDate), Type"
    );
}

#[test]
fn group_requires_by() {
    let err = expect_kind("select Id from X group Name", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`BY` after `GROUP`");
}

#[test]
fn order_by() {
    let input = "select Id from Account order by Name desc nulls last, CreatedDate, Id asc";

    crate::shot_canonical!(
        input,
        @"SELECT Id FROM Account ORDER BY Name DESC NULLS LAST, CreatedDate, Id"
    );
    crate::shot_ast!(input, @r"
    Query
      Select
        Field Id
      From Account
      OrderBy
        Item DESC NULLS LAST
          Field Name
        Item ASC
          Field CreatedDate
        Item ASC
          Field Id
    ");
}

#[test]
fn order_by_modifiers_any_order() {
    crate::shot_canonical!(
        "select Id from Account order by Name nulls first desc",
        @"SELECT Id FROM Account ORDER BY Name DESC NULLS FIRST"
    );
}

#[test]
fn order_by_nulls_requires_position() {
    let err = expect_kind("select Id from X order by Name nulls", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`FIRST` or `LAST` after `NULLS`");
    assert_eq!(err.found(), "end of input");
}

#[test]
fn order_requires_by() {
    let err = expect_kind("select Id from X order Name", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`BY` after `ORDER`");
}

#[test]
fn offset_before_limit() {
    crate::shot_canonical!(
        "select Id from X offset 5 limit 10",
        @"SELECT Id FROM X LIMIT 10 OFFSET 5"
    );
}

#[test]
fn limit_and_offset_bind_variables() {
    let query = expect_valid("select Id from X limit :pageSize offset :skip");

    let limit = query.limit.expect("limit");
    assert_eq!(limit.value, CountValue::Bind("pageSize".to_string()));
    assert_eq!(limit.as_literal(), None);

    crate::shot_canonical!(
        "select Id from X limit :pageSize offset :skip",
        @"SELECT Id FROM X LIMIT :pageSize OFFSET :skip"
    );
}

#[test]
fn duplicate_limit() {
    let err = expect_kind("select Id from X limit 1 limit 2", ErrorKind::TrailingInput);
    assert_eq!(err.position(), 25);
}

#[test]
fn for_clause() {
    let modes = |input: &str| expect_valid(input).for_clause.map(|f| f.modes());

    assert_eq!(modes("select Id from X for view").as_deref(), Some("VIEW"));
    assert_eq!(modes("select Id from X FOR Reference").as_deref(), Some("REFERENCE"));
    assert_eq!(modes("select Id from X limit 1 for update").as_deref(), Some("UPDATE"));
    assert_eq!(modes("select Id from X"), None);
}

#[test]
fn for_view_and_reference_combine() {
    crate::shot_canonical!(
        "select Id from X for reference, view",
        @"SELECT Id FROM X FOR VIEW, REFERENCE"
    );

    let clause = expect_valid("select Id from X for view, reference")
        .for_clause
        .expect("query has a FOR clause");
    assert!(clause.view && clause.reference);
    assert!(!clause.update && !clause.tracking && !clause.viewstat);
}

#[test]
fn for_update_tracking_and_viewstat() {
    crate::shot_canonical!(
        "select Id from X for update tracking",
        @"SELECT Id FROM X FOR UPDATE TRACKING"
    );
    crate::shot_canonical!(
        "select Id from X for update viewstat, tracking",
        @"SELECT Id FROM X FOR UPDATE TRACKING, VIEWSTAT"
    );

    let clause = expect_valid("select Id from X for update viewstat")
        .for_clause
        .expect("query has a FOR clause");
    assert!(clause.update && clause.viewstat);
    assert!(!clause.view && !clause.reference && !clause.tracking);
}

#[test]
fn for_requires_mode() {
    let err = expect_kind("select Id from X for delete", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`VIEW`, `REFERENCE` or `UPDATE` after `FOR`");
    assert_eq!(err.found(), "`delete`");
}

#[test]
fn for_rejects_repeated_or_mixed_modes() {
    let err = expect_kind("select Id from X for view, view", ErrorKind::UnexpectedToken);
    assert_eq!(err.found(), "`view`");

    let err = expect_kind("select Id from X for view, update", ErrorKind::UnexpectedToken);
    assert_eq!(err.found(), "`update`");

    let err = expect_kind("select Id from X for update tracking,", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`TRACKING` or `VIEWSTAT`");
    assert_eq!(err.found(), "end of input");
}

#[test]
fn all_clauses() {
    let input = "select Name, count(Id) from Account where Industry != null group by Name having count(Id) > 1 order by Name limit 5 offset 10 for view";

    crate::shot_canonical!(
        input,
        @"SELECT Name, count(Id) FROM Account WHERE Industry != NULL GROUP BY Name HAVING count(Id) > 1 ORDER BY Name LIMIT 5 OFFSET 10 FOR VIEW"
    );
}

#[test]
fn clause_out_of_order() {
    let err = expect_kind(
        "select Id from X order by Name where A = 1",
        ErrorKind::TrailingInput,
    );
    assert_eq!(err.found(), "`where`");
}
