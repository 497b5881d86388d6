//! Show the token stream of a query.

use std::fmt::Write;

use soql_parser::parser::tokenize;

use super::query_loader::QueryInput;
use super::run_common::load_or_exit;

pub struct TokensArgs {
    pub input: QueryInput,
}

pub fn run(args: TokensArgs) {
    let source = load_or_exit(&args.input);
    print!("{}", format_tokens(&source.text));
}

/// One line per token: kind, byte span, text.
pub fn format_tokens(text: &str) -> String {
    let mut out = String::new();
    for token in tokenize(text) {
        writeln!(
            out,
            "{:?} {}..{} {:?}",
            token.kind,
            u32::from(token.span.start()),
            u32::from(token.span.end()),
            token.text(text)
        )
        .expect("String write never fails");
    }
    out
}
