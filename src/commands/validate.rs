//! Single-document schema validation (`skillcheck validate <file.md>`).

use crate::document;
use crate::runtime::context::CommandContext;
use crate::runtime::error::{LintError, LintResult};
use crate::runtime::fs::{read_text, rel_posix};
use crate::schema::{self, Violation};
use crate::CheckCommand;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// `skillcheck validate <file.md>`
pub struct ValidateCommand;

impl CheckCommand for ValidateCommand {
    type Options = PathBuf;

    fn parse(args: &[String]) -> LintResult<Self::Options> {
        match args {
            [file] => Ok(PathBuf::from(file)),
            _ => Err(LintError::validation(
                "usage: skillcheck validate <file.md>",
            )),
        }
    }

    fn run(ctx: &CommandContext, file: Self::Options) -> LintResult<()> {
        let path = ctx.resolve_path(&file);
        if !path.exists() {
            return Err(LintError::not_found(format!(
                "File not found: {}",
                file.display()
            )));
        }

        let schema = schema::load(&ctx.schemas_dir().join("command.schema.json"))?;
        let violations = validate_document(&path, &schema)?;
        let rel = rel_posix(ctx.root(), &path);

        if violations.is_empty() {
            println!("OK: {rel} validates against command.schema.json");
            return Ok(());
        }

        eprintln!("Validation failed for {rel}:");
        for v in &violations {
            eprintln!("  {}: {}", v.path, v.message);
        }
        Err(LintError::validation(format!(
            "{} schema violation(s)",
            violations.len()
        )))
    }
}

/// Parse a document (metadata block stripped) and validate it against `schema`.
///
/// Shared with the bulk and changed-file commands so every path through the
/// toolchain applies identical parse-then-validate semantics.
pub(crate) fn validate_document(path: &Path, schema: &Value) -> LintResult<Vec<Violation>> {
    let text = read_text(path)?;
    let parsed = document::parse(document::strip_metadata_block(&text));
    let value = serde_json::to_value(&parsed)
        .map_err(|err| LintError::config(format!("failed to encode parsed document: {err}")))?;
    Ok(schema::validate(&value, schema))
}
