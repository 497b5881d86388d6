use crate::ast::{
    ForClause, FromClause, NullsOrder, Operand, OrderByItem, Query, SortDirection,
};
use crate::parser::Parser;
use crate::parser::core::PResult;
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// `SELECT items FROM object [WHERE] [GROUP BY] [HAVING] [ORDER BY] [LIMIT|OFFSET]* [FOR]`
    ///
    /// Shared by the top-level query and every sub-query.
    pub(crate) fn parse_query(&mut self) -> PResult<Query> {
        self.enter_query()?;
        let query = self.parse_query_clauses();
        self.exit_query();
        query
    }

    fn parse_query_clauses(&mut self) -> PResult<Query> {
        let select_kw = self.expect(TokenKind::KwSelect, "`SELECT`")?;
        let start = select_kw.span.start();

        let select = self.parse_select_list()?;
        let select_end = self.last_end();

        if !self.at(TokenKind::KwFrom) {
            return Err(self.missing_clause("`FROM` after SELECT list", select_end));
        }
        let from = self.parse_from()?;

        let where_clause = match self.eat(TokenKind::KwWhere) {
            Some(_) => Some(self.parse_expr()?),
            None => None,
        };

        let mut group_by = Vec::new();
        if self.eat(TokenKind::KwGroup).is_some() {
            self.expect(TokenKind::KwBy, "`BY` after `GROUP`")?;
            group_by = self.parse_operand_list("field or function call")?;
        }

        let having = match self.eat(TokenKind::KwHaving) {
            Some(_) => Some(self.parse_expr()?),
            None => None,
        };

        let mut order_by = Vec::new();
        if self.eat(TokenKind::KwOrder).is_some() {
            self.expect(TokenKind::KwBy, "`BY` after `ORDER`")?;
            order_by.push(self.parse_order_by_item()?);
            while self.eat(TokenKind::Comma).is_some() {
                order_by.push(self.parse_order_by_item()?);
            }
        }

        // LIMIT and OFFSET may come in either order, each at most once.
        let mut limit = None;
        let mut offset = None;
        loop {
            match self.current() {
                TokenKind::KwLimit if limit.is_none() => {
                    self.bump();
                    limit = Some(self.parse_count("LIMIT")?);
                }
                TokenKind::KwOffset if offset.is_none() => {
                    self.bump();
                    offset = Some(self.parse_count("OFFSET")?);
                }
                _ => break,
            }
        }

        let for_clause = if self.at(TokenKind::KwFor) {
            Some(self.parse_for()?)
        } else {
            None
        };

        Ok(Query {
            select,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
            offset,
            for_clause,
            span: self.span_from(start),
        })
    }

    /// `FROM Object [alias]`
    fn parse_from(&mut self) -> PResult<FromClause> {
        let from_kw = self.expect(TokenKind::KwFrom, "`FROM`")?;
        let object = self.parse_field_path("object name after `FROM`")?;
        let alias = self.parse_alias()?;
        Ok(FromClause {
            object,
            alias,
            span: self.span_from(from_kw.span.start()),
        })
    }

    pub(super) fn parse_operand_list(&mut self, what: &str) -> PResult<Vec<Operand>> {
        let mut operands = vec![self.parse_operand(what)?];
        while self.eat(TokenKind::Comma).is_some() {
            operands.push(self.parse_operand(what)?);
        }
        Ok(operands)
    }

    /// `operand [ASC|DESC] [NULLS FIRST|LAST]`, modifiers in either order.
    fn parse_order_by_item(&mut self) -> PResult<OrderByItem> {
        let operand = self.parse_operand("field or function call")?;
        let start = operand.span().start();

        let mut direction = None;
        let mut nulls = None;
        loop {
            match self.current() {
                TokenKind::KwAsc if direction.is_none() => {
                    self.bump();
                    direction = Some(SortDirection::Asc);
                }
                TokenKind::KwDesc if direction.is_none() => {
                    self.bump();
                    direction = Some(SortDirection::Desc);
                }
                TokenKind::KwNulls if nulls.is_none() => {
                    self.bump();
                    nulls = Some(match self.current() {
                        TokenKind::KwFirst => NullsOrder::First,
                        TokenKind::KwLast => NullsOrder::Last,
                        _ => return Err(self.unexpected("`FIRST` or `LAST` after `NULLS`")),
                    });
                    self.bump();
                }
                _ => break,
            }
        }

        Ok(OrderByItem {
            operand,
            direction: direction.unwrap_or_default(),
            nulls,
            span: self.span_from(start),
        })
    }

    /// `FOR VIEW [, REFERENCE]`, `FOR REFERENCE [, VIEW]` or
    /// `FOR UPDATE [TRACKING | VIEWSTAT [, ...]]`
    fn parse_for(&mut self) -> PResult<ForClause> {
        let for_kw = self.expect(TokenKind::KwFor, "`FOR`")?;
        let (update, words) = if self.at_word("UPDATE") {
            self.bump();
            let words = if self.at_word("TRACKING") || self.at_word("VIEWSTAT") {
                self.parse_for_words(&["TRACKING", "VIEWSTAT"], "`TRACKING` or `VIEWSTAT`")?
            } else {
                Vec::new()
            };
            (true, words)
        } else {
            let words = self.parse_for_words(
                &["VIEW", "REFERENCE"],
                "`VIEW`, `REFERENCE` or `UPDATE` after `FOR`",
            )?;
            (false, words)
        };
        Ok(ForClause {
            view: words.contains(&"VIEW"),
            reference: words.contains(&"REFERENCE"),
            update,
            tracking: words.contains(&"TRACKING"),
            viewstat: words.contains(&"VIEWSTAT"),
            span: self.span_from(for_kw.span.start()),
        })
    }

    /// Comma-separated words from `allowed`, each at most once.
    fn parse_for_words(
        &mut self,
        allowed: &[&'static str],
        expected: &str,
    ) -> PResult<Vec<&'static str>> {
        let mut seen = Vec::new();
        loop {
            let next = allowed
                .iter()
                .copied()
                .find(|word| !seen.contains(word) && self.at_word(word));
            let Some(word) = next else {
                return Err(self.unexpected(expected));
            };
            self.bump();
            seen.push(word);
            if seen.len() == allowed.len() || self.eat(TokenKind::Comma).is_none() {
                return Ok(seen);
            }
        }
    }
}
