use serde::Serialize;

/// Broad error family a kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCategory {
    /// Raised on lexical shape (unterminated string).
    Lex,
    /// Raised by a grammar production.
    Syntax,
    /// `LIMIT`/`OFFSET` argument is not a non-negative integer.
    LimitOffset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorKind {
    UnterminatedString,

    // Grammar
    UnexpectedToken,
    MissingClause,
    UnbalancedParentheses,
    InvalidLiteralShape,
    TooDeeplyNested,
    TrailingInput,
    InvalidSemiJoin,

    InvalidLimitOffset,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnterminatedString => ErrorCategory::Lex,
            Self::InvalidLimitOffset => ErrorCategory::LimitOffset,
            _ => ErrorCategory::Syntax,
        }
    }

    /// Base message, completed with the expected/found pair.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string literal",
            Self::UnexpectedToken => "unexpected token",
            Self::MissingClause => "missing clause",
            Self::UnbalancedParentheses => "unbalanced parentheses",
            Self::InvalidLiteralShape => "invalid literal",
            Self::TooDeeplyNested => "query is nested too deeply",
            Self::TrailingInput => "unexpected input after end of query",
            Self::InvalidSemiJoin => "invalid semi-join sub-query",
            Self::InvalidLimitOffset => "invalid LIMIT/OFFSET value",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "UnterminatedString",
            Self::UnexpectedToken => "UnexpectedToken",
            Self::MissingClause => "MissingClause",
            Self::UnbalancedParentheses => "UnbalancedParentheses",
            Self::InvalidLiteralShape => "InvalidLiteralShape",
            Self::TooDeeplyNested => "TooDeeplyNested",
            Self::TrailingInput => "TrailingInput",
            Self::InvalidSemiJoin => "InvalidSemiJoin",
            Self::InvalidLimitOffset => "InvalidLimitOffset",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
