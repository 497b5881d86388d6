//! Owned AST produced by the parser.
//!
//! Nodes are immutable once built and carry the [`Span`] of the text they were
//! parsed from. Spans never take part in equality or hashing: two trees parsed
//! from differently formatted text of the same query compare equal.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rowan::{TextRange, TextSize};
use serde::{Serialize, Serializer};

/// Source span of a node. Always equal to every other span.
#[derive(Debug, Clone, Copy, Default)]
pub struct Span(TextRange);

impl Span {
    pub fn new(range: TextRange) -> Self {
        Self(range)
    }

    pub fn range(&self) -> TextRange {
        self.0
    }

    pub fn start(&self) -> TextSize {
        self.0.start()
    }

    pub fn end(&self) -> TextSize {
        self.0.end()
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span(self.0.cover(other.0))
    }
}

impl From<TextRange> for Span {
    fn from(range: TextRange) -> Self {
        Self(range)
    }
}

impl PartialEq for Span {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for Span {}

impl Hash for Span {
    fn hash<H: Hasher>(&self, _: &mut H) {}
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Span", 2)?;
        state.serialize_field("start", &u32::from(self.0.start()))?;
        state.serialize_field("end", &u32::from(self.0.end()))?;
        state.end()
    }
}

macro_rules! spanned {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn span(&self) -> Span {
                    self.span
                }
            }
        )*
    };
}

spanned!(
    Query,
    Ident,
    FieldPath,
    FunctionCall,
    SelectField,
    SelectCall,
    SelectSubQuery,
    TypeOf,
    WhenBranch,
    FromClause,
    Comparison,
    LikePattern,
    InList,
    LogicalExpr,
    NotExpr,
    ParenExpr,
    Value,
    OrderByItem,
    Count,
    ForClause,
);

/// Root node: one `SELECT` statement, possibly nested inside another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query {
    pub select: Vec<SelectItem>,
    pub from: FromClause,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<Expr>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<Operand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub having: Option<Expr>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderByItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Count>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Count>,
    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_clause: Option<ForClause>,
    pub span: Span,
}

/// A single identifier segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

/// Dot-separated relationship traversal, e.g. `Account.Owner.Name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldPath {
    pub segments: Vec<Ident>,
    pub span: Span,
}

impl FieldPath {
    /// Splits a dotted identifier into segments, each with its own span.
    pub fn from_dotted(text: &str, span: Span) -> Self {
        let mut offset = span.start();
        let segments = text
            .split('.')
            .map(|segment| {
                let len = TextSize::of(segment);
                let ident = Ident::new(segment, Span::new(TextRange::at(offset, len)));
                offset += len + TextSize::of('.');
                ident
            })
            .collect();
        Self { segments, span }
    }

    pub fn last(&self) -> Option<&Ident> {
        self.segments.last()
    }
}

/// `NAME(arg, ...)`. Aggregates, date functions, `FIELDS(ALL)` and friends.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionCall {
    pub name: Ident,
    pub args: Vec<FunctionArg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum FunctionArg {
    Call(FunctionCall),
    Field(FieldPath),
    Value(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum SelectItem {
    /// `SELECT *`. Only valid as the sole item.
    Wildcard { span: Span },
    FieldPath(SelectField),
    AggregateCall(SelectCall),
    TypeOf(TypeOf),
    /// Relationship sub-query: `(SELECT Id FROM Contacts)`.
    NestedQuery(SelectSubQuery),
}

impl SelectItem {
    pub fn span(&self) -> Span {
        match self {
            SelectItem::Wildcard { span } => *span,
            SelectItem::FieldPath(it) => it.span,
            SelectItem::AggregateCall(it) => it.span,
            SelectItem::TypeOf(it) => it.span,
            SelectItem::NestedQuery(it) => it.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectField {
    pub path: FieldPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectCall {
    pub call: FunctionCall,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Ident>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SelectSubQuery {
    pub query: Box<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Ident>,
    pub span: Span,
}

/// `TYPEOF What WHEN Account THEN Phone ELSE Name END`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeOf {
    pub field: FieldPath,
    pub branches: Vec<WhenBranch>,
    pub else_fields: Vec<FieldPath>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WhenBranch {
    pub type_name: Ident,
    pub fields: Vec<FieldPath>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FromClause {
    pub object: FieldPath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Ident>,
    pub span: Span,
}

/// Left-hand side of a condition, a GROUP BY entry or an ORDER BY key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum Operand {
    Field(FieldPath),
    Call(FunctionCall),
}

impl Operand {
    pub fn span(&self) -> Span {
        match self {
            Operand::Field(path) => path.span,
            Operand::Call(call) => call.span,
        }
    }
}

/// Condition expression used by WHERE and HAVING.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Comparison(Comparison),
    Like(LikePattern),
    In(InList),
    And(LogicalExpr),
    Or(LogicalExpr),
    Not(NotExpr),
    Paren(ParenExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Comparison(it) => it.span,
            Expr::Like(it) => it.span,
            Expr::In(it) => it.span,
            Expr::And(it) | Expr::Or(it) => it.span,
            Expr::Not(it) => it.span,
            Expr::Paren(it) => it.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Comparison {
    pub operand: Operand,
    pub op: ComparisonOp,
    pub value: Value,
    pub span: Span,
}

/// `Name LIKE 'A%'` / `Name NOT LIKE 'A%'`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LikePattern {
    pub operand: Operand,
    pub negated: bool,
    pub pattern: Value,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InOp {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT IN")]
    NotIn,
    #[serde(rename = "INCLUDES")]
    Includes,
    #[serde(rename = "EXCLUDES")]
    Excludes,
}

impl InOp {
    pub fn as_str(self) -> &'static str {
        match self {
            InOp::In => "IN",
            InOp::NotIn => "NOT IN",
            InOp::Includes => "INCLUDES",
            InOp::Excludes => "EXCLUDES",
        }
    }
}

/// Membership test. Every operator takes a value list or a bind variable
/// holding one; `IN`/`NOT IN` also take a semi-join sub-query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InList {
    pub operand: Operand,
    pub op: InOp,
    pub values: InValues,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum InValues {
    List(Vec<Value>),
    /// `IN :ids`, without parentheses.
    Bind(Value),
    Query(Box<Query>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LogicalExpr {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NotExpr {
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParenExpr {
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Value {
    pub kind: ValueKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum ValueKind {
    /// Decoded string contents (escapes resolved).
    String(String),
    /// Number lexeme as written, e.g. `-1.50`.
    Number(String),
    Boolean(bool),
    Null,
    Date(DateLiteral),
    DateTime(DateTimeLiteral),
    Time(TimeLiteral),
    DateFunction(DateFunction),
    /// Bind variable name without the leading `:`.
    Bind(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateLiteral(pub NaiveDate);

/// Date-time with its original UTC offset. `Z` is stored as a zero offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeLiteral(pub DateTime<FixedOffset>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeLiteral {
    pub time: NaiveTime,
    pub utc: bool,
}

macro_rules! serialize_as_display {
    ($($name:ident),*) => {
        $(
            impl Serialize for $name {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_as_display!(DateLiteral, DateTimeLiteral, TimeLiteral);

/// Relative date literal, e.g. `TODAY` or `LAST_N_DAYS:30`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DateFunction {
    /// Canonical uppercase name.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
}

/// `LIMIT` / `OFFSET` argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Count {
    pub value: CountValue,
    pub span: Span,
}

impl Count {
    pub fn as_literal(&self) -> Option<u64> {
        match self.value {
            CountValue::Literal(n) => Some(n),
            CountValue::Bind(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum CountValue {
    Literal(u64),
    Bind(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NullsOrder {
    #[serde(rename = "FIRST")]
    First,
    #[serde(rename = "LAST")]
    Last,
}

impl NullsOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            NullsOrder::First => "FIRST",
            NullsOrder::Last => "LAST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderByItem {
    pub operand: Operand,
    pub direction: SortDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nulls: Option<NullsOrder>,
    pub span: Span,
}

/// `FOR` flags. `VIEW` and `REFERENCE` combine with each other; `UPDATE`
/// stands alone or carries `TRACKING` and `VIEWSTAT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ForClause {
    pub view: bool,
    pub reference: bool,
    pub update: bool,
    pub tracking: bool,
    pub viewstat: bool,
    pub span: Span,
}

impl ForClause {
    /// Canonical clause body without the `FOR` keyword, e.g. `VIEW, REFERENCE`.
    pub fn modes(&self) -> String {
        let words = if self.update {
            [(self.tracking, "TRACKING"), (self.viewstat, "VIEWSTAT")]
        } else {
            [(self.view, "VIEW"), (self.reference, "REFERENCE")]
        };
        let list = words
            .iter()
            .filter(|(set, _)| *set)
            .map(|(_, word)| *word)
            .collect::<Vec<_>>()
            .join(", ");
        match (self.update, list.is_empty()) {
            (false, _) => list,
            (true, true) => "UPDATE".to_owned(),
            (true, false) => format!("UPDATE {list}"),
        }
    }
}
