//! Consistency checks for agent skill/command content repositories (`skillcheck`).
//!
//! The crate is organized as a small CLI layer over single-purpose check
//! modules. Command modules own user-facing option parsing and reporting
//! while the check modules ([`document`], [`registry`], [`schema`],
//! [`mcp_refs`], [`links`], [`install`]) are pure functions of their inputs
//! and the current on-disk snapshot; no component holds cross-call state.

pub mod cli;
pub mod commands;
pub mod document;
pub mod install;
pub mod links;
pub mod mcp_refs;
pub mod registry;
pub mod report;
pub mod runtime;
pub mod schema;

use crate::cli::TopLevelCommand;
use crate::commands::all::AllCommand;
use crate::commands::changed::ChangedCommand;
use crate::commands::install::InstallCommand;
use crate::commands::links::LinksCommand;
use crate::commands::mcps::McpsCommand;
use crate::commands::refs::RefsCommand;
use crate::commands::validate::ValidateCommand;
use crate::runtime::context::CommandContext;
use crate::runtime::error::LintResult;

/// Shared command contract for top-level skillcheck command families.
///
/// [`CheckCommand::parse`] is a pure translation step from raw CLI arguments
/// into a typed options value; side effects stay in [`CheckCommand::run`],
/// which receives the shared [`CommandContext`].
pub trait CheckCommand {
    /// Typed options produced by CLI parsing for the command family.
    type Options;

    /// Parse command-line arguments into typed options.
    fn parse(args: &[String]) -> LintResult<Self::Options>;

    /// Execute the command family against the content root.
    fn run(ctx: &CommandContext, options: Self::Options) -> LintResult<()>;
}

/// Executes the `skillcheck` binary using the current process arguments.
pub fn execute_from_env() -> LintResult<()> {
    let parsed = cli::parse(std::env::args().skip(1).collect())?;
    let ctx = match parsed.root {
        Some(root) => CommandContext::with_root(root),
        None => CommandContext::new()?,
    };

    match parsed.command {
        TopLevelCommand::Validate(args) => {
            ValidateCommand::run(&ctx, ValidateCommand::parse(&args)?)
        }
        TopLevelCommand::All(args) => AllCommand::run(&ctx, AllCommand::parse(&args)?),
        TopLevelCommand::Changed(args) => ChangedCommand::run(&ctx, ChangedCommand::parse(&args)?),
        TopLevelCommand::Mcps(args) => McpsCommand::run(&ctx, McpsCommand::parse(&args)?),
        TopLevelCommand::Refs(args) => RefsCommand::run(&ctx, RefsCommand::parse(&args)?),
        TopLevelCommand::Links(args) => LinksCommand::run(&ctx, LinksCommand::parse(&args)?),
        TopLevelCommand::Install(args) => InstallCommand::run(&ctx, InstallCommand::parse(&args)?),
        TopLevelCommand::Help => {
            cli::print_usage();
            Ok(())
        }
    }
}

/// Converts a skillcheck result into a stable process exit code.
///
/// All failures map to exit code `1` after printing the formatted
/// [`runtime::error::LintError`] to stderr.
pub fn exit_code(result: LintResult<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::from(1)
        }
    }
}
