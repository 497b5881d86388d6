//! Canonical text rendering.
//!
//! Every node implements `Display`. The output uses uppercase keywords, single
//! spaces and `, ` separators, so any two queries with equal trees serialize to
//! the same text.

use std::fmt::{self, Display, Formatter, Write};

use crate::ast::{
    Count, CountValue, DateFunction, DateLiteral, DateTimeLiteral, Expr, FieldPath, ForClause,
    FromClause, FunctionArg, FunctionCall, Ident, InList, InValues, LikePattern, Operand,
    OrderByItem, Query, SelectItem, SortDirection, TimeLiteral, TypeOf, Value, ValueKind,
};
use crate::parser::token::keyword;

/// Renders `query` in canonical form.
pub fn serialize(query: &Query) -> String {
    query.to_string()
}

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Keyword-spelled aliases need `AS` to parse back as aliases.
fn write_alias(f: &mut Formatter<'_>, alias: Option<&Ident>) -> fmt::Result {
    match alias {
        Some(alias) if keyword(&alias.name).is_some() => write!(f, " AS {alias}"),
        Some(alias) => write!(f, " {alias}"),
        None => Ok(()),
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        write_list(f, &self.select)?;
        write!(f, " {}", self.from)?;

        if let Some(expr) = &self.where_clause {
            write!(f, " WHERE {expr}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            write_list(f, &self.group_by)?;
        }
        if let Some(expr) = &self.having {
            write!(f, " HAVING {expr}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            write_list(f, &self.order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        if let Some(for_clause) = &self.for_clause {
            write!(f, " {for_clause}")?;
        }
        Ok(())
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_char('.')?;
            }
            f.write_str(&segment.name)?;
        }
        Ok(())
    }
}

impl Display for FunctionCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_list(f, &self.args)?;
        f.write_char(')')
    }
}

impl Display for FunctionArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FunctionArg::Call(call) => call.fmt(f),
            FunctionArg::Field(path) => path.fmt(f),
            FunctionArg::Value(value) => value.fmt(f),
        }
    }
}

impl Display for SelectItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Wildcard { .. } => f.write_char('*'),
            SelectItem::FieldPath(field) => {
                field.path.fmt(f)?;
                write_alias(f, field.alias.as_ref())
            }
            SelectItem::AggregateCall(call) => {
                call.call.fmt(f)?;
                write_alias(f, call.alias.as_ref())
            }
            SelectItem::TypeOf(type_of) => type_of.fmt(f),
            SelectItem::NestedQuery(sub) => {
                write!(f, "({})", sub.query)?;
                write_alias(f, sub.alias.as_ref())
            }
        }
    }
}

impl Display for TypeOf {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "TYPEOF {}", self.field)?;
        for branch in &self.branches {
            write!(f, " WHEN {} THEN ", branch.type_name)?;
            write_list(f, &branch.fields)?;
        }
        f.write_str(" ELSE ")?;
        write_list(f, &self.else_fields)?;
        f.write_str(" END")
    }
}

impl Display for FromClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FROM {}", self.object)?;
        write_alias(f, self.alias.as_ref())
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Field(path) => path.fmt(f),
            Operand::Call(call) => call.fmt(f),
        }
    }
}

/// Binding strength, loosest first. Leaves bind tightest.
fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Or(_) => 1,
        Expr::And(_) => 2,
        Expr::Not(_) => 3,
        Expr::Comparison(_) | Expr::Like(_) | Expr::In(_) | Expr::Paren(_) => 4,
    }
}

/// Writes `expr`, parenthesised when it binds looser than `min`.
fn write_operand_expr(f: &mut Formatter<'_>, expr: &Expr, min: u8) -> fmt::Result {
    if precedence(expr) < min {
        write!(f, "({expr})")
    } else {
        expr.fmt(f)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            // Right operands need one level more so right-nested chains keep their shape.
            Expr::Or(or) => {
                write_operand_expr(f, &or.left, 1)?;
                f.write_str(" OR ")?;
                write_operand_expr(f, &or.right, 2)
            }
            Expr::And(and) => {
                write_operand_expr(f, &and.left, 2)?;
                f.write_str(" AND ")?;
                write_operand_expr(f, &and.right, 3)
            }
            Expr::Not(not) => {
                f.write_str("NOT ")?;
                write_operand_expr(f, &not.expr, 3)
            }
            Expr::Paren(paren) => write!(f, "({})", paren.expr),
            Expr::Comparison(cmp) => write!(f, "{} {} {}", cmp.operand, cmp.op.as_str(), cmp.value),
            Expr::Like(like) => like.fmt(f),
            Expr::In(list) => list.fmt(f),
        }
    }
}

impl Display for LikePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let not = if self.negated { "NOT " } else { "" };
        write!(f, "{} {not}LIKE {}", self.operand, self.pattern)
    }
}

impl Display for InList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.operand, self.op.as_str())?;
        match &self.values {
            InValues::List(values) => {
                f.write_char('(')?;
                write_list(f, values)?;
                f.write_char(')')
            }
            InValues::Bind(value) => value.fmt(f),
            InValues::Query(query) => write!(f, "({query})"),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String(s) => write_quoted(f, s),
            ValueKind::Number(n) => f.write_str(n),
            ValueKind::Boolean(true) => f.write_str("TRUE"),
            ValueKind::Boolean(false) => f.write_str("FALSE"),
            ValueKind::Null => f.write_str("NULL"),
            ValueKind::Date(date) => date.fmt(f),
            ValueKind::DateTime(datetime) => datetime.fmt(f),
            ValueKind::Time(time) => time.fmt(f),
            ValueKind::DateFunction(func) => func.fmt(f),
            ValueKind::Bind(name) => write!(f, ":{name}"),
        }
    }
}

/// Single-quoted with escapes re-applied. `\_` and `\%` are kept as they are.
fn write_quoted(f: &mut Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('\'')?;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some('_' | '%')) => f.write_char('\\')?,
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{b}' => f.write_str("\\v")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

impl Display for DateLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Display for DateTimeLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        if self.0.offset().local_minus_utc() == 0 {
            f.write_char('Z')
        } else {
            write!(f, "{}", self.0.format("%:z"))
        }
    }
}

impl Display for TimeLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time.format("%H:%M:%S%.f"))?;
        if self.utc {
            f.write_char('Z')?;
        }
        Ok(())
    }
}

impl Display for DateFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(n) = self.n {
            write!(f, ":{n}")?;
        }
        Ok(())
    }
}

impl Display for OrderByItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.operand.fmt(f)?;
        if self.direction == SortDirection::Desc {
            f.write_str(" DESC")?;
        }
        match self.nulls {
            Some(nulls) => write!(f, " NULLS {}", nulls.as_str()),
            None => Ok(()),
        }
    }
}

impl Display for Count {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.value {
            CountValue::Literal(n) => write!(f, "{n}"),
            CountValue::Bind(name) => write!(f, ":{name}"),
        }
    }
}

impl Display for ForClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "FOR {}", self.modes())
    }
}
