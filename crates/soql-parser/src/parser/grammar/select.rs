use crate::ast::{
    FieldPath, Ident, SelectCall, SelectField, SelectItem, SelectSubQuery, TypeOf, WhenBranch,
};
use crate::parser::Parser;
use crate::parser::core::PResult;
use crate::parser::token::TokenKind;

impl Parser<'_> {
    /// `*` | `item (, item)*`
    pub(super) fn parse_select_list(&mut self) -> PResult<Vec<SelectItem>> {
        if let Some(star) = self.eat(TokenKind::Star) {
            return Ok(vec![SelectItem::Wildcard {
                span: star.span.into(),
            }]);
        }

        let mut items = vec![self.parse_select_item()?];
        while self.eat(TokenKind::Comma).is_some() {
            items.push(self.parse_select_item()?);
        }
        Ok(items)
    }

    fn parse_select_item(&mut self) -> PResult<SelectItem> {
        match self.current() {
            TokenKind::ParenOpen => self.parse_nested_query_item(),
            TokenKind::KwTypeof => self.parse_typeof().map(SelectItem::TypeOf),
            // LL(2): `name (` is a function call
            _ if self.at_name() && self.peek(1) == TokenKind::ParenOpen => {
                let call = self.parse_function_call()?;
                let start = call.span.start();
                let alias = self.parse_alias()?;
                Ok(SelectItem::AggregateCall(SelectCall {
                    call,
                    alias,
                    span: self.span_from(start),
                }))
            }
            _ if self.at_name() => {
                let path = self.parse_field_path("field")?;
                let start = path.span.start();
                let alias = self.parse_alias()?;
                Ok(SelectItem::FieldPath(SelectField {
                    path,
                    alias,
                    span: self.span_from(start),
                }))
            }
            _ => Err(self.unexpected("field, function call, `TYPEOF` or sub-query")),
        }
    }

    /// `( SELECT ... ) [alias]`
    fn parse_nested_query_item(&mut self) -> PResult<SelectItem> {
        let open = self.open_paren("`(`")?;
        if !self.at(TokenKind::KwSelect) {
            return Err(self.unexpected("`SELECT` after `(`"));
        }
        let query = self.parse_query()?;
        self.close_paren("`)`")?;
        let alias = self.parse_alias()?;
        Ok(SelectItem::NestedQuery(SelectSubQuery {
            query: Box::new(query),
            alias,
            span: self.span_from(open.span.start()),
        }))
    }

    /// `TYPEOF field (WHEN Type THEN fields)+ ELSE fields END`
    fn parse_typeof(&mut self) -> PResult<TypeOf> {
        let typeof_kw = self.expect(TokenKind::KwTypeof, "`TYPEOF`")?;
        let field = self.parse_field_path("polymorphic field after `TYPEOF`")?;

        let mut branches = Vec::new();
        while let Some(when_kw) = self.eat(TokenKind::KwWhen) {
            let type_name = self.parse_plain_ident("object type after `WHEN`")?;
            self.expect(TokenKind::KwThen, "`THEN`")?;
            let fields = self.parse_field_list()?;
            branches.push(WhenBranch {
                type_name,
                fields,
                span: self.span_from(when_kw.span.start()),
            });
        }

        if branches.is_empty() {
            return Err(self.unexpected("`WHEN`"));
        }

        self.expect(TokenKind::KwElse, "`,`, `WHEN` or `ELSE`")?;
        let else_fields = self.parse_field_list()?;
        self.expect(TokenKind::KwEnd, "`,` or `END`")?;

        Ok(TypeOf {
            field,
            branches,
            else_fields,
            span: self.span_from(typeof_kw.span.start()),
        })
    }

    fn parse_field_list(&mut self) -> PResult<Vec<FieldPath>> {
        let mut fields = vec![self.parse_field_path("field")?];
        while self.eat(TokenKind::Comma).is_some() {
            fields.push(self.parse_field_path("field")?);
        }
        Ok(fields)
    }

    /// `[AS] name`. Without `AS`, only an undotted identifier is taken as an
    /// alias: a bare keyword there starts the next clause or modifier.
    pub(super) fn parse_alias(&mut self) -> PResult<Option<Ident>> {
        if self.eat(TokenKind::KwAs).is_some() {
            return self.parse_plain_ident("alias after `AS`").map(Some);
        }

        let token = self.current_token();
        if token.kind == TokenKind::Ident && !self.text(token).contains('.') {
            self.bump();
            return Ok(Some(Ident::new(self.text(token), token.span.into())));
        }
        Ok(None)
    }

    /// Undotted name. Unreserved keywords qualify.
    pub(super) fn parse_plain_ident(&mut self, what: &str) -> PResult<Ident> {
        let token = self.current_token();
        if !self.at_name() || self.text(token).contains('.') {
            return Err(self.unexpected(what));
        }
        self.bump();
        Ok(Ident::new(self.text(token), token.span.into()))
    }
}
