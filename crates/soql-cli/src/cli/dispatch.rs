//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull the fields each command uses
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::fmt::FmtArgs;
use crate::commands::parse::ParseArgs;
use crate::commands::query_loader::QueryInput;
use crate::commands::tokens::TokensArgs;

pub struct ParseParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub compact: bool,
    pub max_depth: Option<u32>,
}

impl ParseParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            compact: m.get_flag("compact"),
            max_depth: m.get_one::<u32>("max_depth").copied(),
        }
    }
}

impl From<ParseParams> for ParseArgs {
    fn from(p: ParseParams) -> Self {
        Self {
            input: QueryInput::new(p.query_path, p.query_text),
            compact: p.compact,
            max_depth: p.max_depth,
        }
    }
}

pub struct CheckParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub max_depth: Option<u32>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            max_depth: m.get_one::<u32>("max_depth").copied(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: QueryInput::new(p.query_path, p.query_text),
            max_depth: p.max_depth,
            color: p.color.should_colorize(),
        }
    }
}

pub struct FmtParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub max_depth: Option<u32>,
    pub color: ColorChoice,
}

impl FmtParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            max_depth: m.get_one::<u32>("max_depth").copied(),
            color: parse_color(m),
        }
    }
}

impl From<FmtParams> for FmtArgs {
    fn from(p: FmtParams) -> Self {
        Self {
            input: QueryInput::new(p.query_path, p.query_text),
            max_depth: p.max_depth,
            color: p.color.should_colorize(),
        }
    }
}

pub struct AstParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub spans: bool,
    pub max_depth: Option<u32>,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
            spans: m.get_flag("spans"),
            max_depth: m.get_one::<u32>("max_depth").copied(),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            input: QueryInput::new(p.query_path, p.query_text),
            spans: p.spans,
            max_depth: p.max_depth,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TokensParams {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    // Note: color and max_depth are parsed but unused, tokenizing never fails
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            query_text: m.get_one::<String>("query_text").cloned(),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            input: QueryInput::new(p.query_path, p.query_text),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
