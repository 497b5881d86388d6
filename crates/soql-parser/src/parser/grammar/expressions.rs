//! Condition expressions for WHERE and HAVING.
//!
//! Precedence climbing over three levels, loosest first:
//!
//! ```text
//! or   := and (OR and)*
//! and  := not (AND not)*
//! not  := NOT not | primary
//! primary := ( or ) | condition
//! ```
//!
//! Both binary levels are left-associative.

use crate::ast::{
    Comparison, ComparisonOp, Expr, FieldPath, FunctionArg, FunctionCall, Ident, InList, InOp,
    InValues, LikePattern, LogicalExpr, NotExpr, Operand, ParenExpr, Query, SelectItem, Value,
};
use crate::diagnostics::{ErrorKind, SyntaxError};
use crate::parser::Parser;
use crate::parser::core::PResult;
use crate::parser::token::TokenKind;
use crate::parser::token::token_sets::VALUE_FIRST;

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(TokenKind::KwOr).is_some() {
            let right = self.parse_and()?;
            let span = left.span().cover(right.span());
            left = Expr::Or(LogicalExpr {
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let mut left = self.parse_not()?;
        while self.eat(TokenKind::KwAnd).is_some() {
            let right = self.parse_not()?;
            let span = left.span().cover(right.span());
            left = Expr::And(LogicalExpr {
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> PResult<Expr> {
        let Some(not_kw) = self.eat(TokenKind::KwNot) else {
            return self.parse_primary();
        };

        self.enter_expr()?;
        let inner = self.parse_not()?;
        self.exit_expr();

        Ok(Expr::Not(NotExpr {
            expr: Box::new(inner),
            span: self.span_from(not_kw.span.start()),
        }))
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        if !self.at(TokenKind::ParenOpen) {
            return self.parse_condition();
        }

        let open = self.open_paren("`(`")?;
        self.enter_expr()?;
        let inner = self.parse_or()?;
        self.exit_expr();
        self.close_paren("`)`")?;

        Ok(Expr::Paren(ParenExpr {
            expr: Box::new(inner),
            span: self.span_from(open.span.start()),
        }))
    }

    /// `operand op value` | `operand [NOT] LIKE pattern` | `operand [NOT] IN (...)`
    /// | `operand INCLUDES (...)` | `operand EXCLUDES (...)`
    fn parse_condition(&mut self) -> PResult<Expr> {
        let operand = self.parse_operand("condition")?;
        let start = operand.span().start();

        let comparison = match self.current() {
            TokenKind::Eq => Some(ComparisonOp::Eq),
            TokenKind::NotEq => Some(ComparisonOp::NotEq),
            TokenKind::Lt => Some(ComparisonOp::Lt),
            TokenKind::Le => Some(ComparisonOp::Le),
            TokenKind::Gt => Some(ComparisonOp::Gt),
            TokenKind::Ge => Some(ComparisonOp::Ge),
            _ => None,
        };
        if let Some(op) = comparison {
            self.bump();
            let value = self.parse_value("value")?;
            return Ok(Expr::Comparison(Comparison {
                operand,
                op,
                value,
                span: self.span_from(start),
            }));
        }

        let negated = self.eat(TokenKind::KwNot).is_some();

        if self.eat(TokenKind::KwLike).is_some() {
            let pattern = self.parse_like_pattern()?;
            return Ok(Expr::Like(LikePattern {
                operand,
                negated,
                pattern,
                span: self.span_from(start),
            }));
        }

        let op = if self.at(TokenKind::KwIn) {
            if negated { InOp::NotIn } else { InOp::In }
        } else if negated {
            return Err(self.unexpected("`LIKE` or `IN` after `NOT`"));
        } else if self.at_word("INCLUDES") {
            InOp::Includes
        } else if self.at_word("EXCLUDES") {
            InOp::Excludes
        } else {
            return Err(self.unexpected("comparison operator"));
        };
        self.bump();

        let values = self.parse_in_values(op)?;
        Ok(Expr::In(InList {
            operand,
            op,
            values,
            span: self.span_from(start),
        }))
    }

    fn parse_like_pattern(&mut self) -> PResult<Value> {
        match self.current() {
            TokenKind::Str | TokenKind::BindVar => self.parse_value("string pattern"),
            _ => Err(self.unexpected("string pattern after `LIKE`")),
        }
    }

    /// `( value, ... )`, a bare bind variable, or `( SELECT ... )` for `IN` / `NOT IN`.
    fn parse_in_values(&mut self, op: InOp) -> PResult<InValues> {
        if self.at(TokenKind::BindVar) {
            return self.parse_value("bind variable").map(InValues::Bind);
        }

        self.open_paren(&format!("`(` or bind variable after `{}`", op.as_str()))?;

        let accepts_query = matches!(op, InOp::In | InOp::NotIn);
        if accepts_query && self.at(TokenKind::KwSelect) {
            let query = self.parse_semi_join()?;
            self.close_paren("`)`")?;
            return Ok(InValues::Query(Box::new(query)));
        }

        let what = if accepts_query {
            "value or sub-query"
        } else {
            "value"
        };
        let mut values = vec![self.parse_list_value(what)?];
        while self.eat(TokenKind::Comma).is_some() {
            values.push(self.parse_list_value("value")?);
        }
        self.close_paren("`,` or `)`")?;

        Ok(InValues::List(values))
    }

    fn parse_list_value(&mut self, what: &str) -> PResult<Value> {
        if !self.at_any(VALUE_FIRST) {
            return Err(self.unexpected(what));
        }
        self.parse_value(what)
    }

    /// Sub-query on the right of `IN`: must select exactly one field or call.
    fn parse_semi_join(&mut self) -> PResult<Query> {
        let query = self.parse_query()?;

        let found = match query.select.as_slice() {
            [SelectItem::FieldPath(_)] | [SelectItem::AggregateCall(_)] => return Ok(query),
            [SelectItem::Wildcard { .. }] => "`*`".to_string(),
            [SelectItem::TypeOf(_)] => "a `TYPEOF` expression".to_string(),
            [SelectItem::NestedQuery(_)] => "a relationship sub-query".to_string(),
            items => format!("{} select items", items.len()),
        };

        let range = match (query.select.first(), query.select.last()) {
            (Some(first), Some(last)) => first.span().cover(last.span()).range(),
            _ => query.span.range(),
        };
        Err(SyntaxError::new(
            ErrorKind::InvalidSemiJoin,
            range,
            "a single field or function call",
            found,
        ))
    }

    /// `name ( ... )` is a call, any other name a field path.
    pub(super) fn parse_operand(&mut self, what: &str) -> PResult<Operand> {
        if !self.at_name() {
            return Err(self.unexpected(what));
        }
        if self.peek(1) == TokenKind::ParenOpen {
            return self.parse_function_call().map(Operand::Call);
        }
        self.parse_field_path(what).map(Operand::Field)
    }

    pub(super) fn parse_field_path(&mut self, what: &str) -> PResult<FieldPath> {
        if !self.at_name() {
            return Err(self.unexpected(what));
        }
        let token = self.bump();
        Ok(FieldPath::from_dotted(self.text(token), token.span.into()))
    }

    /// `NAME ( [arg (, arg)*] )`
    pub(super) fn parse_function_call(&mut self) -> PResult<FunctionCall> {
        if !self.at_name() {
            return Err(self.unexpected("function name"));
        }
        let name_token = self.bump();
        let name = Ident::new(self.text(name_token), name_token.span.into());

        self.open_paren("`(`")?;
        self.enter_expr()?;
        let mut args = Vec::new();
        if !self.at(TokenKind::ParenClose) {
            args.push(self.parse_function_arg()?);
            while self.eat(TokenKind::Comma).is_some() {
                args.push(self.parse_function_arg()?);
            }
        }
        self.exit_expr();
        self.close_paren("`,` or `)`")?;

        Ok(FunctionCall {
            name,
            args,
            span: self.span_from(name_token.span.start()),
        })
    }

    /// `TRUE`, `FALSE` and `NULL` are values here, other keywords name fields.
    fn parse_function_arg(&mut self) -> PResult<FunctionArg> {
        if self.at_any(VALUE_FIRST) {
            return self.parse_value("function argument").map(FunctionArg::Value);
        }
        self.parse_operand("function argument").map(|operand| match operand {
            Operand::Call(call) => FunctionArg::Call(call),
            Operand::Field(path) => FunctionArg::Field(path),
        })
    }
}
