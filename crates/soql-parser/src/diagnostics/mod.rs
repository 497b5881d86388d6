//! Syntax errors and their rendering.
//!
//! The parser is fail-fast: a parse produces at most one [`SyntaxError`]. The
//! error records what the grammar expected at the failing point and what it
//! found there, so hosts can point users at the exact location.

mod kind;
mod printer;


use rowan::{TextRange, TextSize};

pub use kind::{ErrorCategory, ErrorKind};
pub use printer::ErrorPrinter;

/// Secondary location attached to an error, e.g. the `(` an unbalanced group opened at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub range: TextRange,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    kind: ErrorKind,
    range: TextRange,
    expected: String,
    found: String,
    message: String,
    related: Option<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(
        kind: ErrorKind,
        range: TextRange,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        let found = found.into();
        let message = format!(
            "{}: expected {}, found {}",
            kind.fallback_message(),
            expected,
            found
        );
        Self {
            kind,
            range,
            expected,
            found,
            message,
            related: None,
        }
    }

    pub fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related = Some(RelatedInfo {
            range,
            message: message.into(),
        });
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Byte offset of the offending token.
    pub fn position(&self) -> u32 {
        self.range.start().into()
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    pub fn found(&self) -> &str {
        &self.found
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> Option<&RelatedInfo> {
        self.related.as_ref()
    }

    /// 1-based line and column (in characters) of [`position`](Self::position).
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        line_col(source, self.range.start())
    }

    pub fn printer<'s>(&'s self, source: &'s str) -> ErrorPrinter<'s> {
        ErrorPrinter::new(self, source)
    }
}

pub(crate) fn line_col(source: &str, offset: TextSize) -> (usize, usize) {
    let offset = usize::from(offset).min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
