//! Top-level CLI parsing and help output.

use crate::runtime::error::{LintError, LintResult};
use std::path::PathBuf;

/// Top-level `skillcheck` command families.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TopLevelCommand {
    Validate(Vec<String>),
    All(Vec<String>),
    Changed(Vec<String>),
    Mcps(Vec<String>),
    Refs(Vec<String>),
    Links(Vec<String>),
    Install(Vec<String>),
    Help,
}

/// A parsed invocation: optional content-root override plus the selected command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invocation {
    pub root: Option<PathBuf>,
    pub command: TopLevelCommand,
}

/// Parse raw command-line arguments into a top-level command selection.
pub fn parse(mut args: Vec<String>) -> LintResult<Invocation> {
    let mut root = None;
    if args.first().map(String::as_str) == Some("--root") {
        let Some(value) = args.get(1) else {
            return Err(LintError::validation("missing value for `--root`"));
        };
        root = Some(PathBuf::from(value));
        args.drain(..2);
    }

    let Some(cmd) = args.first().cloned() else {
        return Ok(Invocation {
            root,
            command: TopLevelCommand::Help,
        });
    };

    let rest = args[1..].to_vec();
    let command = match cmd.as_str() {
        "validate" => TopLevelCommand::Validate(rest),
        "all" => TopLevelCommand::All(rest),
        "changed" => TopLevelCommand::Changed(rest),
        "mcps" => TopLevelCommand::Mcps(rest),
        "refs" => TopLevelCommand::Refs(rest),
        "links" => TopLevelCommand::Links(rest),
        "install" => TopLevelCommand::Install(rest),
        "help" | "--help" | "-h" => TopLevelCommand::Help,
        other => {
            return Err(LintError::validation(format!(
                "unknown skillcheck command: {other}"
            )))
        }
    };
    Ok(Invocation { root, command })
}

/// Print the canonical top-level usage text.
pub fn print_usage() {
    eprintln!(
        "Usage: skillcheck [--root <dir>] <command> [args]\n\
         \n\
         Commands:\n\
           validate <file.md>   Validate one command/skill document against the schema\n\
           all                  Validate all documents, the MCP registry, and MCP refs\n\
           changed <file>...    Validate only the given changed files (pre-commit)\n\
           mcps [--list [--json] | <ref>]\n\
                                Validate the MCP registry, list it, or resolve one ref\n\
           refs                 Cross-check MCP tool refs in documents against mcps/\n\
           links <file.md>...   Check markdown links in the given files\n\
           install              Verify the skills/ layout is ready for install\n"
    );
}
