//! MCP ref cross-checking (`skillcheck refs`).

use crate::mcp_refs::{self, InvalidRef};
use crate::registry;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{LintError, LintResult};
use crate::runtime::fs::{collect_subdirectories, collect_top_level_markdown};
use crate::CheckCommand;
use std::path::PathBuf;

/// `skillcheck refs`
pub struct RefsCommand;

impl CheckCommand for RefsCommand {
    type Options = ();

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(LintError::validation("`refs` does not accept arguments"))
        }
    }

    fn run(ctx: &CommandContext, (): Self::Options) -> LintResult<()> {
        let invalid = check_all_refs(ctx)?;
        if invalid.is_empty() {
            println!("OK: all MCP tool refs validate.");
            return Ok(());
        }

        eprintln!("Invalid MCP tool ref(s):");
        for finding in &invalid {
            eprintln!("{}", render_finding(finding));
        }
        Err(LintError::validation(format!(
            "{} invalid MCP tool ref(s)",
            invalid.len()
        )))
    }
}

/// Scan every document for reference tokens against a single registry snapshot.
pub(crate) fn check_all_refs(ctx: &CommandContext) -> LintResult<Vec<InvalidRef>> {
    // One snapshot for the whole pass; valid_refs re-reads the tree per call.
    let valid = registry::valid_refs(ctx.root())?;
    let files = ref_scan_files(ctx)?;
    mcp_refs::check_files(ctx.root(), &files, &valid)
}

/// Documents scanned for reference tokens: command documents, skill
/// documents, and the mirrored command docs under `docs/commands/` when present.
pub(crate) fn ref_scan_files(ctx: &CommandContext) -> LintResult<Vec<PathBuf>> {
    let mut files = command_documents(ctx)?;
    files.extend(skill_documents(ctx)?);
    files.extend(collect_top_level_markdown(
        &ctx.root().join("docs").join("commands"),
    )?);
    Ok(files)
}

/// Top-level `commands/*.md`, excluding the directory README.
pub(crate) fn command_documents(ctx: &CommandContext) -> LintResult<Vec<PathBuf>> {
    Ok(collect_top_level_markdown(&ctx.commands_dir())?
        .into_iter()
        .filter(|p| p.file_name().is_none_or(|n| n != "README.md"))
        .collect())
}

/// `skills/<name>/SKILL.md` for every skill subdirectory that has one.
pub(crate) fn skill_documents(ctx: &CommandContext) -> LintResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for dir in collect_subdirectories(&ctx.skills_dir())? {
        let skill_md = dir.join("SKILL.md");
        if skill_md.is_file() {
            out.push(skill_md);
        }
    }
    Ok(out)
}

pub(crate) fn render_finding(finding: &InvalidRef) -> String {
    let suffix = if finding.suggestions.is_empty() {
        String::new()
    } else {
        format!(" [Did you mean: {}?]", finding.suggestions.join(", "))
    };
    format!(
        "  {}:{}: {}{suffix}",
        finding.path, finding.line, finding.token
    )
}
