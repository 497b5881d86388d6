//! Grammar productions for the query language.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.

mod expressions;
mod query;
mod select;
mod values;

use super::core::{PResult, Parser};
use super::token::TokenKind;
use crate::ast::Query;
use crate::diagnostics::ErrorKind;

impl Parser<'_> {
    /// `query EOF`
    pub(crate) fn parse_root(mut self) -> PResult<Query> {
        let query = self.parse_query()?;

        let token = self.current_token();
        match token.kind {
            TokenKind::Eof => Ok(query),
            TokenKind::ParenClose => Err(self.unexpected("end of input")),
            TokenKind::UnterminatedStr => Err(self.unexpected("end of input")),
            _ => Err(self.error_at(ErrorKind::TrailingInput, token, "end of input")),
        }
    }
}
