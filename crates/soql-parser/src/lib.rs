//! SOQL-style query parser: lexer, typed AST and canonical printer.
//!
//! # Example
//!
//! ```
//! use soql_parser::{parse, serialize};
//!
//! let query = parse("select Id, Name from Contact where Name like 'A%' limit 10")
//!     .expect("valid query");
//! assert_eq!(
//!     serialize(&query),
//!     "SELECT Id, Name FROM Contact WHERE Name LIKE 'A%' LIMIT 10",
//! );
//!
//! let source = "SELECT Id FROM Contact LIMIT -1";
//! let err = parse(source).unwrap_err();
//! eprintln!("{}", err.printer(source).render());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod diagnostics;
pub mod parser;
pub mod printer;
mod result;

#[cfg(test)]
pub mod test_utils;

pub use ast::Query;
pub use diagnostics::{ErrorKind, ErrorPrinter, SyntaxError};
pub use parser::{ParseOptions, parse, parse_with};
pub use printer::{AstPrinter, serialize};
pub use result::{ErrorReport, ParseResult};

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, SyntaxError>;
