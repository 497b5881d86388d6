//! Serializable outcome of a parse, for hosts that exchange JSON.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::ast::Query;
use crate::diagnostics::{ErrorKind, SyntaxError};
use crate::parser::{ParseOptions, parse_with};

/// `{ "ok": true, "ast": ... }` or `{ "ok": false, "error": ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Ok(Query),
    Err(ErrorReport),
}

/// Location-resolved view of a [`SyntaxError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    pub position: u32,
    pub line: usize,
    pub column: usize,
    pub expected: String,
    pub found: String,
}

impl ErrorReport {
    pub fn new(error: &SyntaxError, source: &str) -> Self {
        let (line, column) = error.line_col(source);
        Self {
            kind: error.kind(),
            message: error.message().to_string(),
            position: error.position(),
            line,
            column,
            expected: error.expected().to_string(),
            found: error.found().to_string(),
        }
    }
}

impl ParseResult {
    pub fn parse(source: &str) -> Self {
        Self::parse_with(source, ParseOptions::default())
    }

    pub fn parse_with(source: &str, options: ParseOptions) -> Self {
        Self::from_result(source, parse_with(source, options))
    }

    pub fn from_result(source: &str, result: Result<Query, SyntaxError>) -> Self {
        match result {
            Ok(query) => ParseResult::Ok(query),
            Err(error) => ParseResult::Err(ErrorReport::new(&error, source)),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ParseResult::Ok(_))
    }

    pub fn ast(&self) -> Option<&Query> {
        match self {
            ParseResult::Ok(query) => Some(query),
            ParseResult::Err(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        match self {
            ParseResult::Ok(_) => None,
            ParseResult::Err(report) => Some(report),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for ParseResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            ParseResult::Ok(query) => {
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("ast", query)?;
            }
            ParseResult::Err(report) => {
                map.serialize_entry("ok", &false)?;
                map.serialize_entry("error", report)?;
            }
        }
        map.end()
    }
}
