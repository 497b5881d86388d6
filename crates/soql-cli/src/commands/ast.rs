//! Show the AST of a query.

use soql_parser::AstPrinter;

use super::query_loader::QueryInput;
use super::run_common::{load_or_exit, parse_or_exit};

pub struct AstArgs {
    pub input: QueryInput,
    pub spans: bool,
    pub max_depth: Option<u32>,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_or_exit(&args.input);
    let query = parse_or_exit(&source, args.max_depth, args.color);
    print!("{}", AstPrinter::new(&query).with_spans(args.spans).dump());
}
