//! Print the JSON result envelope of a parse.

use soql_parser::ParseResult;

use super::query_loader::QueryInput;
use super::run_common::{load_or_exit, parse_options};

pub struct ParseArgs {
    pub input: QueryInput,
    pub compact: bool,
    pub max_depth: Option<u32>,
}

pub fn run(args: ParseArgs) {
    let source = load_or_exit(&args.input);
    let result = ParseResult::parse_with(&source.text, parse_options(args.max_depth));

    let json = if args.compact {
        result.to_json()
    } else {
        result.to_json_pretty()
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }

    // The envelope is the output either way; failure still sets the exit status.
    if !result.is_ok() {
        std::process::exit(1);
    }
}
