//! Repository-wide validation (`skillcheck all`).

use crate::commands::mcps;
use crate::commands::refs;
use crate::commands::validate::validate_document;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{LintError, LintResult};
use crate::runtime::fs::rel_posix;
use crate::schema;
use crate::CheckCommand;
use serde_json::Value;
use std::path::PathBuf;

/// `skillcheck all`
pub struct AllCommand;

impl CheckCommand for AllCommand {
    type Options = ();

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(LintError::validation("`all` does not accept arguments"))
        }
    }

    fn run(ctx: &CommandContext, (): Self::Options) -> LintResult<()> {
        let schema = schema::load(&ctx.schemas_dir().join("command.schema.json"))?;

        let commands = refs::command_documents(ctx)?;
        let command_failures = validate_documents(ctx, &commands, &schema)?;

        let skills = refs::skill_documents(ctx)?;
        let skill_failures = validate_documents(ctx, &skills, &schema)?;

        let (mcp_problems, _) = mcps::validate_registry(ctx)?;
        let invalid_refs = refs::check_all_refs(ctx)?;

        let mut failed = false;

        if !command_failures.is_empty() {
            failed = true;
            eprintln!("Validation failed (commands):");
            for (rel, detail) in &command_failures {
                eprintln!("  {rel}: {detail}");
            }
            eprintln!("Run `skillcheck validate <file.md>` for full detail.");
        }

        if !skill_failures.is_empty() {
            failed = true;
            eprintln!("Validation failed (skills):");
            for (rel, detail) in &skill_failures {
                eprintln!("  {rel}: {detail}");
            }
            eprintln!("Run `skillcheck validate <file.md>` for full detail.");
        }

        if !mcp_problems.is_empty() {
            failed = true;
            eprintln!("Validation failed (mcps):");
            for p in &mcp_problems {
                eprintln!("  {}: {}", p.path, p.message);
            }
            eprintln!("Run `skillcheck mcps` for full detail.");
        }

        if !invalid_refs.is_empty() {
            failed = true;
            eprintln!("Validation failed (mcp refs):");
            for finding in &invalid_refs {
                eprintln!("{}", refs::render_finding(finding));
            }
            eprintln!("Run `skillcheck refs` for full detail.");
        }

        if failed {
            return Err(LintError::validation("repository validation failed"));
        }

        println!(
            "OK: all commands ({}), skills ({}), mcps, and mcp refs validate.",
            commands.len(),
            skills.len()
        );
        Ok(())
    }
}

/// Validate each document, keeping only the first violation per failing file.
fn validate_documents(
    ctx: &CommandContext,
    files: &[PathBuf],
    schema: &Value,
) -> LintResult<Vec<(String, String)>> {
    let mut failures = Vec::new();
    for path in files {
        let violations = validate_document(path, schema)?;
        if let Some(first) = violations.first() {
            failures.push((
                rel_posix(ctx.root(), path),
                format!("{}: {}", first.path, first.message),
            ));
        }
    }
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "skillcheck-all-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(AllCommand::parse(&[]).is_ok());
        assert!(AllCommand::parse(&["x".into()]).is_err());
    }

    #[test]
    fn only_failing_documents_are_reported() {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("commands")).expect("mkdir");
        fs::write(
            root.join("commands/good.md"),
            "# good\n\n## Overview\n\nDoes things.\n",
        )
        .expect("write");
        fs::write(root.join("commands/bad.md"), "# bad\n\nno sections here\n").expect("write");

        let schema = json!({
            "type": "object",
            "required": ["overview"],
            "properties": {"overview": {"type": "string", "minLength": 1}}
        });
        let ctx = CommandContext::with_root(&root);
        let files = refs::command_documents(&ctx).expect("enumerate");
        let failures = validate_documents(&ctx, &files, &schema).expect("validate");

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "commands/bad.md");
        assert!(failures[0].1.contains("overview"));
        let _ = fs::remove_dir_all(root);
    }
}
