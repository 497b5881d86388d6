//! Print a query in canonical form.

use soql_parser::serialize;

use super::query_loader::QueryInput;
use super::run_common::{load_or_exit, parse_or_exit};

pub struct FmtArgs {
    pub input: QueryInput,
    pub max_depth: Option<u32>,
    pub color: bool,
}

pub fn run(args: FmtArgs) {
    let source = load_or_exit(&args.input);
    let query = parse_or_exit(&source, args.max_depth, args.color);
    println!("{}", serialize(&query));
}
