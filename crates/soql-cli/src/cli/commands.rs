//! Command builders for the CLI.
//!
//! Every command reads one query and accepts the shared input, color, depth
//! and verbosity flags.

use clap::Command;

use super::args::*;

/// Add the flags every command shares.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(query_path_arg())
        .arg(query_text_arg())
        .arg(color_arg())
        .arg(max_depth_arg())
        .arg(verbose_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("soql")
        .about("Parse, validate and format SOQL-style queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(parse_command())
        .subcommand(check_command())
        .subcommand(fmt_command())
        .subcommand(ast_command())
        .subcommand(tokens_command())
}

/// Parse a query and print the result envelope as JSON.
pub fn parse_command() -> Command {
    let cmd = Command::new("parse")
        .about("Parse a query and print the JSON result envelope")
        .override_usage(
            "\
  soql parse <QUERY>
  soql parse -q <TEXT> [--compact]",
        )
        .after_help(
            r#"EXAMPLES:
  soql parse query.soql                       # pretty JSON
  soql parse -q 'SELECT Id FROM Contact'      # inline query
  cat query.soql | soql parse - --compact     # stdin, one line"#,
        )
        .arg(compact_arg());

    with_common_args(cmd)
}

/// Validate a query. Silent on success.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a query")
        .override_usage(
            "\
  soql check <QUERY>
  soql check -q <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  soql check query.soql
  soql check -q 'SELECT Id FROM Contact LIMIT -1'"#,
        );

    with_common_args(cmd)
}

/// Print the canonical form of a query.
pub fn fmt_command() -> Command {
    let cmd = Command::new("fmt")
        .about("Print a query in canonical form")
        .override_usage(
            "\
  soql fmt <QUERY>
  soql fmt -q <TEXT>",
        );

    with_common_args(cmd)
}

/// Show the AST of a query.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the AST of a query")
        .override_usage(
            "\
  soql ast <QUERY> [--spans]
  soql ast -q <TEXT> [--spans]",
        )
        .arg(spans_arg());

    with_common_args(cmd)
}

/// Show the token stream of a query.
pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("Show the tokens of a query")
        .override_usage(
            "\
  soql tokens <QUERY>
  soql tokens -q <TEXT>",
        );

    with_common_args(cmd)
}
