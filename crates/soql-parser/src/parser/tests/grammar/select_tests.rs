use indoc::indoc;
use rowan::TextRange;

use crate::ast::SelectItem;
use crate::diagnostics::ErrorKind;
use crate::test_utils::{expect_ast, expect_canonical, expect_kind, expect_valid};

#[test]
fn simple_select() {
    let input = "select Id from Contact";

    crate::shot_canonical!(input, @"SELECT Id FROM Contact");
    crate::shot_ast!(input, @r"
    Query
      Select
        Field Id
      From Contact
    ");
}

#[test]
fn multiline_with_comments() {
    let input = indoc! {"
        SELECT Id,
               Name
        FROM Account
        -- only big ones
        WHERE NumberOfEmployees > 1000
    "};

    let res = expect_canonical(input);
    insta::assert_snapshot!(res, @"SELECT Id, Name FROM Account WHERE NumberOfEmployees > 1000");
}

#[test]
fn formatting_does_not_affect_equality() {
    let a = expect_valid("select Id\nfrom   Contact /* all */");
    let b = expect_valid("SELECT Id FROM Contact");
    assert_eq!(a, b);
}

#[test]
fn aliases() {
    let input = "select Name n, count(Id) as total from Account a";

    crate::shot_canonical!(input, @"SELECT Name n, count(Id) total FROM Account a");
    crate::shot_ast!(input, @r"
    Query
      Select
        Field Name as n
        Call count as total
          Field Id
      From Account as a
    ");
}

#[test]
fn unreserved_keywords_as_names() {
    crate::shot_canonical!(
        "select First, Last from Contact order by Last desc nulls last",
        @"SELECT First, Last FROM Contact ORDER BY Last DESC NULLS LAST"
    );
    crate::shot_canonical!("select Id from Group", @"SELECT Id FROM Group");
    crate::shot_canonical!(
        "select Id from Order order by Id",
        @"SELECT Id FROM Order ORDER BY Id"
    );
    crate::shot_canonical!(
        "select typeof Owner when Group then Name else Id end from Case",
        @"SELECT TYPEOF Owner WHEN Group THEN Name ELSE Id END FROM Case"
    );
    crate::shot_canonical!(
        "select count(Desc) from X where Type = 'a'",
        @"SELECT count(Desc) FROM X WHERE Type = 'a'"
    );
}

#[test]
fn keyword_alias_keeps_as() {
    let input = "select Name as Last, count(Id) as Total from X";

    crate::shot_canonical!(input, @"SELECT Name AS Last, count(Id) Total FROM X");
    crate::shot_ast!(input, @r"
    Query
      Select
        Field Name as Last
        Call count as Total
          Field Id
      From X
    ");
}

#[test]
fn reserved_keyword_is_not_a_name() {
    let err = expect_kind("select Id, Limit from X", ErrorKind::UnexpectedToken);
    assert_eq!(err.found(), "`Limit`");
}

#[test]
fn dotted_field_path() {
    let query = expect_valid("select Account.Owner.Name from Contact");

    let SelectItem::FieldPath(field) = &query.select[0] else {
        panic!("expected field path, got {:?}", query.select[0]);
    };
    let names: Vec<_> = field.path.segments.iter().map(|s| s.as_str()).collect();
    assert_eq!(names, ["Account", "Owner", "Name"]);
    assert_eq!(field.path.last().map(|s| s.as_str()), Some("Name"));
    assert_eq!(
        field.path.segments[1].span.range(),
        TextRange::new(15.into(), 20.into())
    );
}

#[test]
fn dotted_name_is_not_an_alias() {
    let err = expect_kind("select Name Account.Id from X", ErrorKind::MissingClause);
    assert_eq!(err.position(), 11);
    assert_eq!(err.found(), "`Account.Id`");
}

#[test]
fn wildcard() {
    let input = "select * from Account";

    crate::shot_canonical!(input, @"SELECT * FROM Account");
    crate::shot_ast!(input, @r"
    Query
      Select
        Wildcard
      From Account
    ");
}

#[test]
fn function_calls() {
    crate::shot_canonical!("select count() from Contact", @"SELECT count() FROM Contact");
    crate::shot_canonical!(
        "select FIELDS(ALL) from Account limit 200",
        @"SELECT FIELDS(ALL) FROM Account LIMIT 200"
    );
}

#[test]
fn nested_function_calls() {
    let input = "select format(convertCurrency(Amount)) amt from Opportunity";

    crate::shot_canonical!(input, @"SELECT format(convertCurrency(Amount)) amt FROM Opportunity");
    crate::shot_ast!(input, @r"
    Query
      Select
        Call format as amt
          Call convertCurrency
            Field Amount
      From Opportunity
    ");
}

#[test]
fn literal_function_arguments() {
    let input =
        "select DISTANCE(Location__c, GEOLOCATION(37.77, -122.41), 'mi') d from Warehouse__c";

    let res = expect_ast(input);
    insta::assert_snapshot!(res, @r"
    Query
      Select
        Call DISTANCE as d
          Field Location__c
          Call GEOLOCATION
            Number 37.77
            Number -122.41
          String 'mi'
      From Warehouse__c
    ");
}

#[test]
fn relationship_subquery() {
    let input = "select Name, (select LastName from Contacts where Active = true) from Account";

    crate::shot_canonical!(
        input,
        @"SELECT Name, (SELECT LastName FROM Contacts WHERE Active = TRUE) FROM Account"
    );
    crate::shot_ast!(input, @r"
    Query
      Select
        Field Name
        SubQuery
          Query
            Select
              Field LastName
            From Contacts
            Where
              Comparison =
                Field Active
                Boolean TRUE
      From Account
    ");
}

#[test]
fn relationship_subquery_alias() {
    crate::shot_canonical!(
        "select (select Id from Contacts) c from Account",
        @"SELECT (SELECT Id FROM Contacts) c FROM Account"
    );
}

#[test]
fn subquery_item_requires_select() {
    let err = expect_kind("select (Id) from Account", ErrorKind::UnexpectedToken);
    assert_eq!(err.expected(), "`SELECT` after `(`");
    assert_eq!(err.found(), "`Id`");
}

#[test]
fn typeof_expression() {
    let input = "select typeof What when Account then Phone, NumberOfEmployees when Opportunity then Amount else Name, Email end from Event";

    crate::shot_canonical!(
        input,
        @"SELECT TYPEOF What WHEN Account THEN Phone, NumberOfEmployees WHEN Opportunity THEN Amount ELSE Name, Email END FROM Event"
    );
    crate::shot_ast!(input, @r"
    Query
      Select
        TypeOf What
          When Account
            Field Phone
            Field NumberOfEmployees
          When Opportunity
            Field Amount
          Else
            Field Name
            Field Email
      From Event
    ");
}

#[test]
fn typeof_requires_when() {
    let err = expect_kind(
        "select typeof What else Name end from Event",
        ErrorKind::UnexpectedToken,
    );
    assert_eq!(err.expected(), "`WHEN`");
    assert_eq!(err.found(), "`else`");
}

#[test]
fn typeof_requires_else() {
    let err = expect_kind(
        "select typeof What when Account then Phone end from Event",
        ErrorKind::UnexpectedToken,
    );
    assert_eq!(err.expected(), "`,`, `WHEN` or `ELSE`");
    assert_eq!(err.found(), "`end`");
}

#[test]
fn empty_select_list() {
    let err = expect_kind("select from Contact", ErrorKind::UnexpectedToken);
    assert_eq!(err.position(), 7);
    assert_eq!(err.found(), "`from`");
}
