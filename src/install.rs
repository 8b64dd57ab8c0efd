//! Install-layout verification for the `skills/` tree.
//!
//! Each skill is a subdirectory of `skills/` holding a `SKILL.md` whose
//! metadata block declares a `name` equal to the folder name (lowercase
//! letters, numbers, and hyphens only) and a non-empty `description`. The
//! same layout serves every agent-skills-compatible installer.

use crate::report::Problem;
use crate::runtime::error::LintResult;
use crate::runtime::fs::{collect_subdirectories, read_text};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*[a-z0-9]$|^[a-z0-9]$").expect("name regex"));

/// Verify the skills tree. Returns all layout findings plus the skill count.
pub fn verify(root: &Path) -> LintResult<(Vec<Problem>, usize)> {
    let mut problems = Vec::new();
    let skills_dir = root.join("skills");

    if !skills_dir.is_dir() {
        problems.push(Problem::new(
            "install",
            "skills",
            "missing top-level directory",
            None,
        ));
        return Ok((problems, 0));
    }

    let skill_dirs = collect_subdirectories(&skills_dir)?;
    if skill_dirs.is_empty() {
        problems.push(Problem::new(
            "install",
            "skills",
            "no subdirectories (no skills found)",
            None,
        ));
    }

    for dir in &skill_dirs {
        let folder = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rel = format!("skills/{folder}/SKILL.md");
        let skill_md = dir.join("SKILL.md");
        if !skill_md.is_file() {
            problems.push(Problem::new(
                "install",
                format!("skills/{folder}"),
                "missing SKILL.md",
                None,
            ));
            continue;
        }
        let text = read_text(&skill_md)?;
        problems.extend(check_frontmatter(&rel, &folder, &text));
    }

    Ok((problems, skill_dirs.len()))
}

fn check_frontmatter(rel: &str, folder: &str, text: &str) -> Vec<Problem> {
    let mut problems = Vec::new();
    let Some(fm) = parse_frontmatter(text) else {
        problems.push(Problem::new("install", rel, "missing metadata block", None));
        return problems;
    };

    match fm.get("name") {
        None => problems.push(Problem::new("install", rel, "metadata missing `name`", None)),
        Some(Value::String(name)) if name == folder => {
            if !NAME_RE.is_match(name) {
                problems.push(Problem::new(
                    "install",
                    rel,
                    "`name` must be lowercase letters, numbers, and hyphens only",
                    None,
                ));
            }
        }
        Some(Value::String(name)) => problems.push(Problem::new(
            "install",
            rel,
            format!("metadata name `{name}` must match folder name `{folder}`"),
            None,
        )),
        Some(_) => problems.push(Problem::new(
            "install",
            rel,
            "metadata `name` must be a string",
            None,
        )),
    }

    match fm.get("description") {
        None => problems.push(Problem::new(
            "install",
            rel,
            "metadata missing `description`",
            None,
        )),
        Some(Value::String(desc)) if !desc.trim().is_empty() => {}
        Some(_) => problems.push(Problem::new(
            "install",
            rel,
            "metadata `description` must be a non-empty string",
            None,
        )),
    }

    problems
}

/// Parse the leading metadata block into a JSON map via YAML.
///
/// Returns `None` when the block is absent, unclosed, or not a mapping; the
/// caller reports those uniformly as a missing metadata block.
fn parse_frontmatter(text: &str) -> Option<serde_json::Map<String, Value>> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }
    let mut raw = String::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        raw.push_str(line);
    }
    if !closed {
        return None;
    }
    match serde_yaml::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
