use super::query_loader::QueryInput;
use super::run_common::{load_or_exit, parse_or_exit};

pub struct CheckArgs {
    pub input: QueryInput,
    pub max_depth: Option<u32>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(&args.input);
    parse_or_exit(&source, args.max_depth, args.color);

    // Silent on success (like cargo check)
}
