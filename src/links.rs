//! Markdown link checking for content documents.
//!
//! Flags malformed external URLs and local targets that do not exist. Anchor,
//! mail, and custom-scheme links are skipped, as are bare placeholder tokens
//! that are clearly not paths.

use crate::report::Problem;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]\(([^)]+)\)").expect("link regex"));

/// Check every markdown link in one document's text.
///
/// `rel_path` qualifies findings; `file_path` anchors relative targets.
pub fn check_text(root: &Path, file_path: &Path, rel_path: &str, text: &str) -> Vec<Problem> {
    let mut problems = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no + 1;
        for caps in LINK_RE.captures_iter(line) {
            let target = caps[1].trim();
            if let Some(problem) = check_target(root, file_path, target) {
                problems.push(Problem::new("links", rel_path, problem, Some(line_no)));
            }
        }
    }

    problems
}

fn check_target(root: &Path, file_path: &Path, target: &str) -> Option<String> {
    // In-page anchors and mail links are out of scope.
    if target.starts_with('#') || target.starts_with("mailto:") {
        return None;
    }

    if let Some(rest) = target
        .strip_prefix("http://")
        .or_else(|| target.strip_prefix("https://"))
    {
        let host = rest.split('/').next().unwrap_or("");
        if host.is_empty() {
            return Some(format!("invalid external URL `{target}`"));
        }
        // Reachability of well-formed external links is a CI concern.
        return None;
    }

    // Other custom schemes (cursor://, vscode://, ...) are deliberate.
    if has_uri_scheme(target) {
        return None;
    }

    if is_placeholder_token(target) {
        return None;
    }

    let resolved = if let Some(rooted) = target.strip_prefix('/') {
        root.join(rooted)
    } else {
        let parent = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        parent.join(target)
    };

    if exists_or_markdown_sibling(&resolved, target) {
        None
    } else {
        Some(format!("broken link target `{target}`"))
    }
}

fn exists_or_markdown_sibling(resolved: &PathBuf, target: &str) -> bool {
    if resolved.exists() {
        return true;
    }
    // Extensionless targets commonly point at a markdown page.
    if !target.ends_with(".md") && resolved.extension().is_none() {
        return resolved.with_extension("md").exists();
    }
    false
}

fn has_uri_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Bare words with no path separator and no file extension are treated as
/// placeholder/example tokens (`YOUR-REPO`, `example-token`), not paths.
fn is_placeholder_token(target: &str) -> bool {
    !target.contains('/') && Path::new(target).extension().is_none()
}
