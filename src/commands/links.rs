//! Markdown link checking (`skillcheck links <path>...`).

use crate::links;
use crate::report::{fail_if_problems, Problem};
use crate::runtime::context::CommandContext;
use crate::runtime::error::LintResult;
use crate::runtime::fs::{read_text, rel_posix};
use crate::CheckCommand;
use std::path::PathBuf;

/// `skillcheck links <path>...`
pub struct LinksCommand;

impl CheckCommand for LinksCommand {
    type Options = Vec<PathBuf>;

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        Ok(args.iter().map(PathBuf::from).collect())
    }

    fn run(ctx: &CommandContext, files: Self::Options) -> LintResult<()> {
        if files.is_empty() {
            println!("No files to check");
            return Ok(());
        }

        let mut problems = Vec::new();
        for file in &files {
            let path = ctx.resolve_path(file);
            let rel = rel_posix(ctx.root(), &path);
            if !path.is_file() {
                problems.push(Problem::new("links", &rel, "file not found", None));
                continue;
            }
            let text = read_text(&path)?;
            problems.extend(links::check_text(ctx.root(), &path, &rel, &text));
        }

        fail_if_problems(
            problems,
            &format!("OK: checked links in {} file(s)", files.len()),
        )
    }
}
