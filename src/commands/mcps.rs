//! Registry validation, listing, and ref resolution (`skillcheck mcps`).

use crate::registry;
use crate::report::{fail_if_problems, Problem};
use crate::runtime::context::CommandContext;
use crate::runtime::error::{LintError, LintResult};
use crate::runtime::fs::{collect_files_with_suffix, read_text, rel_posix};
use crate::schema;
use crate::CheckCommand;
use serde_json::Value;
use std::path::Path;

/// Typed options for the `mcps` command family.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum McpsOptions {
    /// Validate every descriptor in the registry.
    ValidateAll,
    /// Enumerate the registry as TSV or JSON.
    List { json: bool },
    /// Resolve one `mcp_<server>_<tool>` ref and validate its descriptor.
    Resolve(String),
}

/// `skillcheck mcps [--list [--json] | <ref>]`
pub struct McpsCommand;

impl CheckCommand for McpsCommand {
    type Options = McpsOptions;

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        match args.first().map(String::as_str) {
            None => Ok(McpsOptions::ValidateAll),
            Some("--list" | "-l") => {
                let json = args[1..].iter().any(|a| a == "--json");
                Ok(McpsOptions::List { json })
            }
            Some(reference) if args.len() == 1 => Ok(McpsOptions::Resolve(reference.to_string())),
            _ => Err(LintError::validation(
                "usage: skillcheck mcps [--list [--json] | <ref>]",
            )),
        }
    }

    fn run(ctx: &CommandContext, options: Self::Options) -> LintResult<()> {
        match options {
            McpsOptions::ValidateAll => {
                let (problems, count) = validate_registry(ctx)?;
                fail_if_problems(
                    problems,
                    &format!("OK: all {count} mcps/**/*.json validate against mcp-tool.schema.json"),
                )
            }
            McpsOptions::List { json } => list(ctx, json),
            McpsOptions::Resolve(reference) => resolve_one(ctx, &reference),
        }
    }
}

/// Validate every JSON file under `mcps/` against the descriptor schema.
///
/// Returns all findings plus the number of files examined. Registry validity
/// is not file-local, so the changed-file command reuses this whole-registry
/// pass whenever any descriptor changed.
pub(crate) fn validate_registry(ctx: &CommandContext) -> LintResult<(Vec<Problem>, usize)> {
    let schema = schema::load(&ctx.schemas_dir().join("mcp-tool.schema.json"))?;
    let files = collect_files_with_suffix(&ctx.mcps_dir(), ".json")?;
    let mut problems = Vec::new();

    for path in &files {
        let rel = rel_posix(ctx.root(), path);
        problems.extend(validate_descriptor_file(path, &rel, &schema)?);
    }

    Ok((problems, files.len()))
}

fn validate_descriptor_file(path: &Path, rel: &str, schema: &Value) -> LintResult<Vec<Problem>> {
    let text = read_text(path)?;
    match serde_json::from_str::<Value>(&text) {
        Err(err) => Ok(vec![Problem::new(
            "mcps",
            rel,
            format!("invalid JSON: {err}"),
            None,
        )]),
        Ok(value) => Ok(schema::validate(&value, schema)
            .into_iter()
            .map(|v| Problem::new("mcps", rel, format!("{} {}", v.path, v.message), None))
            .collect()),
    }
}

fn list(ctx: &CommandContext, json: bool) -> LintResult<()> {
    let tools = registry::enumerate(ctx.root())?;
    if json {
        let rendered = serde_json::to_string_pretty(&tools)
            .map_err(|err| LintError::io(format!("failed to encode listing: {err}")))?;
        println!("{rendered}");
        return Ok(());
    }
    println!("server\ttool\tref\tpath");
    for t in tools {
        println!("{}\t{}\t{}\t{}", t.server, t.tool, t.r#ref, t.path);
    }
    Ok(())
}

fn resolve_one(ctx: &CommandContext, reference: &str) -> LintResult<()> {
    let Some(path) = registry::resolve(ctx.root(), reference) else {
        return Err(LintError::not_found(format!(
            "Resolver: no file found for {reference}"
        )));
    };

    let schema = schema::load(&ctx.schemas_dir().join("mcp-tool.schema.json"))?;
    let rel = rel_posix(ctx.root(), &path);
    let problems = validate_descriptor_file(&path, &rel, &schema)?;
    fail_if_problems(problems, &rel)
}
