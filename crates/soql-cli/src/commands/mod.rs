pub mod ast;
pub mod check;
pub mod fmt;
pub mod parse;
pub mod query_loader;
pub mod run_common;
pub mod tokens;
