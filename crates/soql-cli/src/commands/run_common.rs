//! Loading and parsing steps shared by the query commands.

use soql_parser::{ParseOptions, Query, SyntaxError, parse_with};
use tracing::debug;

use super::query_loader::{QueryInput, QuerySource, load_query_source};

pub fn load_or_exit(input: &QueryInput) -> QuerySource {
    match load_query_source(input) {
        Ok(source) => {
            debug!(
                target: "soql::cli",
                name = source.name.as_deref().unwrap_or("<inline>"),
                bytes = source.text.len(),
                "loaded query"
            );
            source
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

pub fn parse_options(max_depth: Option<u32>) -> ParseOptions {
    match max_depth {
        Some(depth) => ParseOptions::new().with_max_query_depth(depth),
        None => ParseOptions::default(),
    }
}

pub fn render_error(error: &SyntaxError, source: &QuerySource, color: bool) -> String {
    let printer = error.printer(&source.text).colored(color);
    match source.name.as_deref() {
        Some(name) => printer.path(name).render(),
        None => printer.render(),
    }
}

/// Parses the query, or prints the diagnostic and exits with status 1.
pub fn parse_or_exit(source: &QuerySource, max_depth: Option<u32>, color: bool) -> Query {
    match parse_with(&source.text, parse_options(max_depth)) {
        Ok(query) => query,
        Err(e) => {
            eprintln!("{}", render_error(&e, source, color));
            std::process::exit(1);
        }
    }
}
