//! Indented tree dump of a parsed query.

use std::fmt::{Display, Write};

use crate::ast::{
    Expr, FieldPath, FunctionArg, FunctionCall, Ident, InValues, Operand, Query, SelectItem, Span,
    Value, ValueKind,
};

pub struct AstPrinter<'q> {
    query: &'q Query,
    spans: bool,
}

impl<'q> AstPrinter<'q> {
    pub fn new(query: &'q Query) -> Self {
        Self {
            query,
            spans: false,
        }
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_query(self.query, 0, w)
    }

    fn line(
        &self,
        w: &mut impl Write,
        indent: usize,
        label: impl Display,
        span: Span,
    ) -> std::fmt::Result {
        write!(w, "{}{}", "  ".repeat(indent), label)?;
        if self.spans {
            write!(w, " @{}..{}", u32::from(span.start()), u32::from(span.end()))?;
        }
        writeln!(w)
    }

    fn format_query(&self, query: &Query, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        self.line(w, indent, "Query", query.span)?;

        writeln!(w, "{}Select", "  ".repeat(indent + 1))?;
        for item in &query.select {
            self.format_select_item(item, indent + 2, w)?;
        }

        let from = &query.from;
        self.line(
            w,
            indent + 1,
            format!("From {}{}", from.object, alias_suffix(from.alias.as_ref())),
            from.span,
        )?;

        if let Some(expr) = &query.where_clause {
            writeln!(w, "{}Where", "  ".repeat(indent + 1))?;
            self.format_expr(expr, indent + 2, w)?;
        }

        if !query.group_by.is_empty() {
            writeln!(w, "{}GroupBy", "  ".repeat(indent + 1))?;
            for operand in &query.group_by {
                self.format_operand(operand, indent + 2, w)?;
            }
        }

        if let Some(expr) = &query.having {
            writeln!(w, "{}Having", "  ".repeat(indent + 1))?;
            self.format_expr(expr, indent + 2, w)?;
        }

        if !query.order_by.is_empty() {
            writeln!(w, "{}OrderBy", "  ".repeat(indent + 1))?;
            for item in &query.order_by {
                let mut label = format!("Item {}", item.direction.as_str());
                if let Some(nulls) = item.nulls {
                    write!(label, " NULLS {}", nulls.as_str())?;
                }
                self.line(w, indent + 2, label, item.span)?;
                self.format_operand(&item.operand, indent + 3, w)?;
            }
        }

        if let Some(limit) = &query.limit {
            self.line(w, indent + 1, format!("Limit {limit}"), limit.span)?;
        }
        if let Some(offset) = &query.offset {
            self.line(w, indent + 1, format!("Offset {offset}"), offset.span)?;
        }
        if let Some(for_clause) = &query.for_clause {
            self.line(w, indent + 1, format!("For {}", for_clause.modes()), for_clause.span)?;
        }
        Ok(())
    }

    fn format_select_item(
        &self,
        item: &SelectItem,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        match item {
            SelectItem::Wildcard { span } => self.line(w, indent, "Wildcard", *span),
            SelectItem::FieldPath(field) => self.line(
                w,
                indent,
                format!("Field {}{}", field.path, alias_suffix(field.alias.as_ref())),
                field.span,
            ),
            SelectItem::AggregateCall(call) => {
                self.format_call(&call.call, alias_suffix(call.alias.as_ref()), indent, w)
            }
            SelectItem::TypeOf(type_of) => {
                self.line(w, indent, format!("TypeOf {}", type_of.field), type_of.span)?;
                for branch in &type_of.branches {
                    self.line(w, indent + 1, format!("When {}", branch.type_name), branch.span)?;
                    self.format_fields(&branch.fields, indent + 2, w)?;
                }
                writeln!(w, "{}Else", "  ".repeat(indent + 1))?;
                self.format_fields(&type_of.else_fields, indent + 2, w)
            }
            SelectItem::NestedQuery(sub) => {
                self.line(
                    w,
                    indent,
                    format!("SubQuery{}", alias_suffix(sub.alias.as_ref())),
                    sub.span,
                )?;
                self.format_query(&sub.query, indent + 1, w)
            }
        }
    }

    fn format_fields(&self, fields: &[FieldPath], indent: usize, w: &mut impl Write) -> std::fmt::Result {
        for field in fields {
            self.line(w, indent, format!("Field {field}"), field.span)?;
        }
        Ok(())
    }

    fn format_call(
        &self,
        call: &FunctionCall,
        suffix: String,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        self.line(w, indent, format!("Call {}{}", call.name, suffix), call.span)?;
        for arg in &call.args {
            match arg {
                FunctionArg::Call(inner) => self.format_call(inner, String::new(), indent + 1, w)?,
                FunctionArg::Field(path) => {
                    self.line(w, indent + 1, format!("Field {path}"), path.span)?
                }
                FunctionArg::Value(value) => self.format_value(value, indent + 1, w)?,
            }
        }
        Ok(())
    }

    fn format_operand(&self, operand: &Operand, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        match operand {
            Operand::Field(path) => self.line(w, indent, format!("Field {path}"), path.span),
            Operand::Call(call) => self.format_call(call, String::new(), indent, w),
        }
    }

    fn format_expr(&self, expr: &Expr, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        match expr {
            Expr::Or(or) => {
                self.line(w, indent, "Or", or.span)?;
                self.format_expr(&or.left, indent + 1, w)?;
                self.format_expr(&or.right, indent + 1, w)
            }
            Expr::And(and) => {
                self.line(w, indent, "And", and.span)?;
                self.format_expr(&and.left, indent + 1, w)?;
                self.format_expr(&and.right, indent + 1, w)
            }
            Expr::Not(not) => {
                self.line(w, indent, "Not", not.span)?;
                self.format_expr(&not.expr, indent + 1, w)
            }
            Expr::Paren(paren) => {
                self.line(w, indent, "Paren", paren.span)?;
                self.format_expr(&paren.expr, indent + 1, w)
            }
            Expr::Comparison(cmp) => {
                self.line(w, indent, format!("Comparison {}", cmp.op.as_str()), cmp.span)?;
                self.format_operand(&cmp.operand, indent + 1, w)?;
                self.format_value(&cmp.value, indent + 1, w)
            }
            Expr::Like(like) => {
                let label = if like.negated { "NotLike" } else { "Like" };
                self.line(w, indent, label, like.span)?;
                self.format_operand(&like.operand, indent + 1, w)?;
                self.format_value(&like.pattern, indent + 1, w)
            }
            Expr::In(list) => {
                self.line(w, indent, format!("In {}", list.op.as_str()), list.span)?;
                self.format_operand(&list.operand, indent + 1, w)?;
                match &list.values {
                    InValues::List(values) => {
                        for value in values {
                            self.format_value(value, indent + 1, w)?;
                        }
                        Ok(())
                    }
                    InValues::Bind(value) => self.format_value(value, indent + 1, w),
                    InValues::Query(query) => self.format_query(query, indent + 1, w),
                }
            }
        }
    }

    fn format_value(&self, value: &Value, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let variant = match &value.kind {
            ValueKind::String(_) => "String",
            ValueKind::Number(_) => "Number",
            ValueKind::Boolean(_) => "Boolean",
            ValueKind::Null => "Null",
            ValueKind::Date(_) => "Date",
            ValueKind::DateTime(_) => "DateTime",
            ValueKind::Time(_) => "Time",
            ValueKind::DateFunction(_) => "DateFunction",
            ValueKind::Bind(_) => "Bind",
        };
        self.line(w, indent, format!("{variant} {}", value.kind), value.span)
    }
}

fn alias_suffix(alias: Option<&Ident>) -> String {
    alias.map(|alias| format!(" as {alias}")).unwrap_or_default()
}
