//! Parser infrastructure for the query language.
//!
//! # Architecture
//!
//! Hand-written recursive descent over a lazily lexed token stream:
//!
//! ```text
//! source text -> tokenize() -> Parser -> ast::Query
//! ```
//!
//! Grammar productions live in [`grammar`] as `impl Parser` blocks, one method
//! per production, each returning `Result<Node, SyntaxError>`.
//!
//! # Error handling
//!
//! Parsing is fail-fast. The first error aborts the parse and is returned as the
//! sole result; there is no partial tree and no error recovery.
//!
//! # Depth limits
//!
//! Sub-query nesting and expression nesting (parentheses, `NOT`, function calls)
//! are bounded by [`ParseOptions`] so adversarial input fails with
//! `TooDeeplyNested` instead of exhausting the stack.

mod core;
mod grammar;
pub mod lexer;
pub mod token;

#[cfg(test)]
mod tests;

pub(crate) use self::core::Parser;
pub use lexer::{Lexer, Token, tokenize};
pub use token::{TokenKind, TokenSet, token_sets};

use crate::ast::Query;
use crate::diagnostics::SyntaxError;

pub const DEFAULT_MAX_QUERY_DEPTH: u32 = 30;
pub const DEFAULT_MAX_EXPR_DEPTH: u32 = 128;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_query_depth: u32,
    max_expr_depth: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_query_depth: DEFAULT_MAX_QUERY_DEPTH,
            max_expr_depth: DEFAULT_MAX_EXPR_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of sub-queries nested inside one another. The top-level
    /// query does not count.
    pub fn with_max_query_depth(mut self, depth: u32) -> Self {
        self.max_query_depth = depth;
        self
    }

    /// Maximum nesting of parenthesised groups, `NOT` and function calls.
    pub fn with_max_expr_depth(mut self, depth: u32) -> Self {
        self.max_expr_depth = depth;
        self
    }

    pub fn max_query_depth(&self) -> u32 {
        self.max_query_depth
    }

    pub fn max_expr_depth(&self) -> u32 {
        self.max_expr_depth
    }
}

/// Parses one query with default limits.
pub fn parse(source: &str) -> Result<Query, SyntaxError> {
    parse_with(source, ParseOptions::default())
}

pub fn parse_with(source: &str, options: ParseOptions) -> Result<Query, SyntaxError> {
    tracing::debug!(target: "soql::parser", len = source.len(), "parsing query");

    let result = Parser::new(source, options).parse_root();

    match &result {
        Ok(query) => {
            tracing::debug!(target: "soql::parser", items = query.select.len(), "parsed query");
        }
        Err(err) => {
            tracing::debug!(
                target: "soql::parser",
                kind = %err.kind(),
                position = err.position(),
                "parse failed"
            );
        }
    }

    result
}
