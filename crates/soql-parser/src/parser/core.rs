//! Parser state machine and low-level operations.

use std::collections::VecDeque;

use rowan::{TextRange, TextSize};

use super::ParseOptions;
use super::lexer::{Lexer, Token};
use super::token::{TokenKind, TokenSet};
use crate::ast::Span;
use crate::diagnostics::{ErrorKind, SyntaxError};

pub(crate) type PResult<T> = Result<T, SyntaxError>;

/// Recursive-descent parser over a lazily lexed token stream.
///
/// Fail-fast: every production returns the first error it meets and the
/// partially built node is dropped with it.
pub struct Parser<'src> {
    pub(super) source: &'src str,
    lexer: Lexer<'src>,
    lookahead: VecDeque<Token>,
    last_end: TextSize,
    /// Spans of the `(` tokens that are still waiting for their `)`.
    open_parens: Vec<TextRange>,
    query_depth: u32,
    expr_depth: u32,
    options: ParseOptions,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            lookahead: VecDeque::with_capacity(4),
            last_end: TextSize::from(0),
            open_parens: Vec::with_capacity(8),
            query_depth: 0,
            expr_depth: 0,
            options,
        }
    }

    fn fill(&mut self, n: usize) {
        while self.lookahead.len() <= n {
            match self.lexer.next() {
                Some(token) => self.lookahead.push_back(token),
                None => break,
            }
        }
    }

    fn eof_token(&self) -> Token {
        Token::new(TokenKind::Eof, TextRange::empty(self.eof_offset()))
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    /// LL(k) lookahead. Past the end, yields a synthesized `Eof` token.
    pub(super) fn nth(&mut self, n: usize) -> Token {
        self.fill(n);
        self.lookahead
            .get(n)
            .copied()
            .unwrap_or_else(|| self.eof_token())
    }

    pub(super) fn current_token(&mut self) -> Token {
        self.nth(0)
    }

    pub(super) fn current(&mut self) -> TokenKind {
        self.nth(0).kind
    }

    pub(super) fn peek(&mut self, n: usize) -> TokenKind {
        self.nth(n).kind
    }

    pub(super) fn at(&mut self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_any(&mut self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Current token can name a field, object or type: an identifier, or a
    /// keyword that is not reserved. `ORDER` and `GROUP` are reserved only in
    /// front of `BY`.
    pub(super) fn at_name(&mut self) -> bool {
        match self.current() {
            TokenKind::Ident => true,
            TokenKind::KwOrder | TokenKind::KwGroup => self.peek(1) != TokenKind::KwBy,
            kind => kind.is_keyword() && !kind.is_reserved(),
        }
    }

    /// Current token is a plain identifier spelled `word` (any case).
    pub(super) fn at_word(&mut self, word: &str) -> bool {
        let token = self.current_token();
        token.kind == TokenKind::Ident && token.text(self.source).eq_ignore_ascii_case(word)
    }

    pub(super) fn text(&self, token: Token) -> &'src str {
        token.text(self.source)
    }

    /// Consumes the current token. At end of input, returns `Eof` without advancing.
    pub(super) fn bump(&mut self) -> Token {
        self.fill(0);
        match self.lookahead.pop_front() {
            Some(token) => {
                self.last_end = token.span.end();
                token
            }
            None => self.eof_token(),
        }
    }

    pub(super) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// On mismatch: error describing `what` was expected, nothing consumed.
    pub(super) fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(what)),
        }
    }

    /// End offset of the last consumed token.
    pub(super) fn last_end(&self) -> TextSize {
        self.last_end
    }

    pub(super) fn span_from(&self, start: TextSize) -> Span {
        Span::new(TextRange::new(start, self.last_end.max(start)))
    }

    pub(super) fn describe(&self, token: Token) -> String {
        match token.kind {
            TokenKind::Eof | TokenKind::UnterminatedStr => token.kind.describe().to_string(),
            _ => format!("`{}`", self.text(token)),
        }
    }

    /// Error at the current token.
    ///
    /// The kind is refined from what was found: an unterminated string is a
    /// lexical error, and a `)` nothing opened or an end of input inside an
    /// open group is a parenthesis imbalance.
    pub(super) fn unexpected(&mut self, expected: &str) -> SyntaxError {
        let token = self.current_token();
        let found = self.describe(token);
        match token.kind {
            TokenKind::UnterminatedStr => {
                SyntaxError::new(ErrorKind::UnterminatedString, token.span, "closing `'`", found)
            }
            TokenKind::ParenClose if self.open_parens.is_empty() => {
                SyntaxError::new(ErrorKind::UnbalancedParentheses, token.span, expected, found)
            }
            TokenKind::Eof => match self.open_parens.last().copied() {
                Some(open) => {
                    SyntaxError::new(ErrorKind::UnbalancedParentheses, token.span, expected, found)
                        .related_to("`(` opened here", open)
                }
                None => SyntaxError::new(ErrorKind::UnexpectedToken, token.span, expected, found),
            },
            _ => SyntaxError::new(ErrorKind::UnexpectedToken, token.span, expected, found),
        }
    }

    /// Error of a given kind anchored at `token`.
    pub(super) fn error_at(
        &self,
        kind: ErrorKind,
        token: Token,
        expected: impl Into<String>,
    ) -> SyntaxError {
        SyntaxError::new(kind, token.span, expected, self.describe(token))
    }

    pub(super) fn missing_clause(&mut self, expected: &str, at: TextSize) -> SyntaxError {
        let token = self.current_token();
        let found = self.describe(token);
        SyntaxError::new(ErrorKind::MissingClause, TextRange::empty(at), expected, found)
    }

    pub(super) fn open_paren(&mut self, what: &str) -> PResult<Token> {
        let token = self.expect(TokenKind::ParenOpen, what)?;
        self.open_parens.push(token.span);
        Ok(token)
    }

    /// Closes the innermost open group.
    ///
    /// When the `)` is missing, the rest of the input decides the error kind:
    /// if it still holds enough `)` to close every open group the current token
    /// is merely unexpected, otherwise the parentheses are unbalanced.
    pub(super) fn close_paren(&mut self, expected: &str) -> PResult<Token> {
        if let Some(token) = self.eat(TokenKind::ParenClose) {
            self.open_parens.pop();
            return Ok(token);
        }

        let current = self.current_token();
        if matches!(current.kind, TokenKind::UnterminatedStr | TokenKind::Eof) {
            return Err(self.unexpected(expected));
        }

        let closable = self.closable_in_rest();
        let open = self.open_parens.len();
        if closable >= open {
            return Err(self.error_at(ErrorKind::UnexpectedToken, current, expected));
        }

        let unclosed = self.open_parens[open - 1 - closable];
        Err(
            self.error_at(ErrorKind::UnbalancedParentheses, current, expected)
                .related_to("`(` opened here", unclosed),
        )
    }

    /// How many currently open groups the remaining tokens could close.
    fn closable_in_rest(&mut self) -> usize {
        self.lookahead.extend(self.lexer.by_ref());
        let mut balance: i64 = 0;
        let mut lowest: i64 = 0;
        for token in &self.lookahead {
            match token.kind {
                TokenKind::ParenOpen => balance += 1,
                TokenKind::ParenClose => {
                    balance -= 1;
                    lowest = lowest.min(balance);
                }
                _ => {}
            }
        }
        lowest.unsigned_abs() as usize
    }

    pub(super) fn enter_query(&mut self) -> PResult<()> {
        if self.query_depth > self.options.max_query_depth {
            let token = self.current_token();
            return Err(SyntaxError::new(
                ErrorKind::TooDeeplyNested,
                token.span,
                format!(
                    "at most {} nested sub-queries",
                    self.options.max_query_depth
                ),
                format!("a sub-query at depth {}", self.query_depth),
            ));
        }
        tracing::trace!(target: "soql::parser", depth = self.query_depth, "entering query");
        self.query_depth += 1;
        Ok(())
    }

    pub(super) fn exit_query(&mut self) {
        self.query_depth = self.query_depth.saturating_sub(1);
    }

    pub(super) fn enter_expr(&mut self) -> PResult<()> {
        if self.expr_depth >= self.options.max_expr_depth {
            let token = self.current_token();
            return Err(SyntaxError::new(
                ErrorKind::TooDeeplyNested,
                token.span,
                format!(
                    "at most {} nested expressions",
                    self.options.max_expr_depth
                ),
                format!("an expression at depth {}", self.expr_depth + 1),
            ));
        }
        self.expr_depth += 1;
        Ok(())
    }

    pub(super) fn exit_expr(&mut self) {
        self.expr_depth = self.expr_depth.saturating_sub(1);
    }
}
