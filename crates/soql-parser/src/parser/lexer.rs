//! Lexer for the query language.
//!
//! Produces span-based tokens lazily. Text is sliced from source only when needed.
//!
//! ## Post-processing
//!
//! The logos token stream is filtered before the parser sees it:
//! - trivia (whitespace and comments) is dropped
//! - consecutive error characters coalesce into a single `Unknown` token
//! - non-dotted identifiers are classified against the keyword and date-function
//!   tables, and `NaN` / `Infinity` become numbers

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::token::{TokenKind, date_function, keyword};

/// Zero-copy token: kind + span, text retrieved via [`Token::text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    /// O(1) slice into source.
    #[inline]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[Range::<usize>::from(self.span)]
    }
}

pub(crate) fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Starts lexing `source`. The returned iterator is consumed once and never fails.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    /// Token lexed right after an `Unknown` run, handed out on the next call.
    pending: Option<Token>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            pending: None,
        }
    }

    fn classify(&self, kind: TokenKind, span: Range<usize>) -> Token {
        let kind = if kind == TokenKind::Ident {
            classify_ident(&self.source[span.clone()])
        } else {
            kind
        };
        Token::new(kind, range_to_text_range(span))
    }
}

fn classify_ident(text: &str) -> TokenKind {
    if text.contains('.') {
        return TokenKind::Ident;
    }
    if let Some(kind) = keyword(text) {
        return kind;
    }
    if date_function(text).is_some() {
        return TokenKind::DateFunction;
    }
    if text.eq_ignore_ascii_case("NaN") || text.eq_ignore_ascii_case("Infinity") {
        return TokenKind::Number;
    }
    TokenKind::Ident
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let mut error_start: Option<usize> = None;

        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let span = self.inner.span();
                    let garbage = error_start
                        .take()
                        .map(|start| Token::new(TokenKind::Unknown, range_to_text_range(start..span.start)));

                    if kind.is_trivia() {
                        if garbage.is_some() {
                            return garbage;
                        }
                        continue;
                    }

                    let token = self.classify(kind, span);
                    match garbage {
                        Some(garbage) => {
                            self.pending = Some(token);
                            return Some(garbage);
                        }
                        None => return Some(token),
                    }
                }
                Some(Err(())) => {
                    if error_start.is_none() {
                        error_start = Some(self.inner.span().start);
                    }
                }
                None => {
                    return error_start.map(|start| {
                        Token::new(
                            TokenKind::Unknown,
                            range_to_text_range(start..self.source.len()),
                        )
                    });
                }
            }
        }
    }
}
