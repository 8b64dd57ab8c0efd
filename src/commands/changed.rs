//! Changed-file validation (`skillcheck changed <path>...`).
//!
//! Meant for pre-commit hooks: only the named files are validated, except
//! that a touched registry descriptor triggers a whole-registry pass since
//! descriptor validity is not file-local.

use crate::commands::mcps;
use crate::commands::validate::validate_document;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{LintError, LintResult};
use crate::runtime::fs::rel_posix;
use crate::schema;
use crate::CheckCommand;
use std::path::PathBuf;

/// `skillcheck changed <path>...`
pub struct ChangedCommand;

impl CheckCommand for ChangedCommand {
    type Options = Vec<PathBuf>;

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        Ok(args.iter().map(PathBuf::from).collect())
    }

    fn run(ctx: &CommandContext, files: Self::Options) -> LintResult<()> {
        if files.is_empty() {
            println!("No files to validate");
            return Ok(());
        }

        let mut documents = Vec::new();
        let mut skill_count = 0usize;
        let mut mcp_count = 0usize;

        for file in &files {
            let path = ctx.resolve_path(file);
            let rel = rel_posix(ctx.root(), &path);
            match classify(&rel) {
                Some(ChangedKind::Command) => documents.push(path),
                Some(ChangedKind::Skill) => {
                    skill_count += 1;
                    documents.push(path);
                }
                Some(ChangedKind::Descriptor) => mcp_count += 1,
                None => {}
            }
        }

        if documents.is_empty() && mcp_count == 0 {
            println!("No files to validate");
            return Ok(());
        }

        let mut failures: Vec<(String, String)> = Vec::new();

        if !documents.is_empty() {
            let schema = schema::load(&ctx.schemas_dir().join("command.schema.json"))?;
            for path in &documents {
                if !path.exists() {
                    failures.push((rel_posix(ctx.root(), path), "File not found".to_string()));
                    continue;
                }
                let violations = validate_document(path, &schema)?;
                if let Some(first) = violations.first() {
                    failures.push((
                        rel_posix(ctx.root(), path),
                        format!("{}: {}", first.path, first.message),
                    ));
                }
            }
        }

        if mcp_count > 0 {
            let (problems, _) = mcps::validate_registry(ctx)?;
            failures.extend(
                problems
                    .into_iter()
                    .map(|p| (p.path, p.message)),
            );
        }

        if !failures.is_empty() {
            eprintln!("Validation failed:");
            for (rel, detail) in &failures {
                eprintln!("  {rel}: {detail}");
            }
            return Err(LintError::validation(format!(
                "{} file(s) failed validation",
                failures.len()
            )));
        }

        println!(
            "OK: validated {} command(s), {skill_count} skill(s) and {mcp_count} MCP file(s)",
            documents.len() - skill_count
        );
        Ok(())
    }
}

enum ChangedKind {
    Command,
    Skill,
    Descriptor,
}

/// Route a repository-relative path to the check it belongs to, if any.
fn classify(rel: &str) -> Option<ChangedKind> {
    let parts: Vec<&str> = rel.split('/').collect();
    match parts.as_slice() {
        ["commands", name] if name.ends_with(".md") && *name != "README.md" => {
            Some(ChangedKind::Command)
        }
        ["skills", _, "SKILL.md"] => Some(ChangedKind::Skill),
        ["mcps", ..] if rel.ends_with(".json") => Some(ChangedKind::Descriptor),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "skillcheck-changed-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    fn kind(rel: &str) -> Option<&'static str> {
        classify(rel).map(|k| match k {
            ChangedKind::Command => "command",
            ChangedKind::Skill => "skill",
            ChangedKind::Descriptor => "descriptor",
        })
    }

    #[test]
    fn paths_route_to_their_checks() {
        assert_eq!(kind("commands/plan.md"), Some("command"));
        assert_eq!(kind("skills/demo/SKILL.md"), Some("skill"));
        assert_eq!(kind("mcps/github/tools/list_commits.json"), Some("descriptor"));
    }

    #[test]
    fn unrelated_paths_are_skipped() {
        assert_eq!(kind("commands/README.md"), None);
        assert_eq!(kind("commands/sub/plan.md"), None);
        assert_eq!(kind("skills/demo/notes.md"), None);
        assert_eq!(kind("docs/guide.md"), None);
        assert_eq!(kind("mcps/github/server.md"), None);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let files = ChangedCommand::parse(&[]).expect("parse");
        assert!(files.is_empty());
    }

    #[test]
    fn missing_command_document_fails_the_run() {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("schemas")).expect("mkdir");
        fs::write(
            root.join("schemas/command.schema.json"),
            r#"{"type": "object"}"#,
        )
        .expect("write schema");

        let ctx = CommandContext::with_root(&root);
        let result = ChangedCommand::run(&ctx, vec![PathBuf::from("commands/gone.md")]);
        assert!(result.is_err(), "got: {result:?}");
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn only_unclassified_paths_is_a_no_op() {
        let root = unique_temp_root();
        fs::create_dir_all(&root).expect("mkdir");

        // No schema on disk: the early no-op return must come first.
        let ctx = CommandContext::with_root(&root);
        let result = ChangedCommand::run(&ctx, vec![PathBuf::from("docs/guide.md")]);
        assert!(result.is_ok(), "got: {result:?}");
        let _ = fs::remove_dir_all(root);
    }
}
