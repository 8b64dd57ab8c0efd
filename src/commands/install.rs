//! Install-layout verification (`skillcheck install`).

use crate::install;
use crate::report::fail_if_problems;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{LintError, LintResult};
use crate::CheckCommand;

/// `skillcheck install`
pub struct InstallCommand;

impl CheckCommand for InstallCommand {
    type Options = ();

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(LintError::validation("`install` does not accept arguments"))
        }
    }

    fn run(ctx: &CommandContext, (): Self::Options) -> LintResult<()> {
        let (problems, count) = install::verify(ctx.root())?;
        fail_if_problems(
            problems,
            &format!("OK: skills layout ready for install ({count} skill(s))."),
        )
    }
}
