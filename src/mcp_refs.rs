//! Reference Resolver: cross-check embedded MCP tool refs against the registry.
//!
//! Every `mcp_<server>_<tool>` occurrence in a document is examined in file
//! order; the first occurrence of each distinct unknown token per file is
//! reported with fuzzy suggestions drawn from the valid-ref set.

use crate::document::mcp_ref_pattern;
use crate::runtime::error::LintResult;
use crate::runtime::fs::{read_text, rel_posix};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Suggestions below this similarity ratio are dropped.
const SUGGESTION_CUTOFF: f64 = 0.6;
/// At most this many suggestions accompany one invalid token.
const MAX_SUGGESTIONS: usize = 3;

/// One unrecognized reference token, at its first occurrence within a file.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidRef {
    /// Root-relative source path.
    pub path: String,
    /// 1-indexed line of the first occurrence.
    pub line: usize,
    /// The offending token.
    pub token: String,
    /// Up to three close valid refs, best first; empty when none clear the cutoff.
    pub suggestions: Vec<String>,
}

/// Scan one document's text for unknown reference tokens.
///
/// Repeats of an already-flagged token within the same text are suppressed;
/// tokens present in `valid` are never reported.
pub fn check_text(rel_path: &str, text: &str, valid: &BTreeSet<String>) -> Vec<InvalidRef> {
    let mut out = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for m in mcp_ref_pattern().find_iter(text) {
        let token = m.as_str();
        if valid.contains(token) || !seen.insert(token) {
            continue;
        }
        let line = text[..m.start()].matches('\n').count() + 1;
        out.push(InvalidRef {
            path: rel_path.to_string(),
            line,
            token: token.to_string(),
            suggestions: close_matches(token, valid),
        });
    }

    out
}

/// Scan a list of files in order, aggregating per-file findings.
pub fn check_files(
    root: &Path,
    files: &[PathBuf],
    valid: &BTreeSet<String>,
) -> LintResult<Vec<InvalidRef>> {
    let mut out = Vec::new();
    for path in files {
        let text = read_text(path)?;
        out.extend(check_text(&rel_posix(root, path), &text, valid));
    }
    Ok(out)
}

/// Up to [`MAX_SUGGESTIONS`] candidates with similarity >= the cutoff, best first.
fn close_matches(token: &str, valid: &BTreeSet<String>) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = valid
        .iter()
        .map(|candidate| (similarity(token, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_CUTOFF)
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

/// Ratcliff/Obershelp similarity ratio on a 0-1 scale: twice the number of
/// matching characters over the total length, with matches found by recursive
/// longest-common-substring decomposition.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = matching_chars(&a, &b);
    2.0 * matched as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_common_run(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..ai], &b[..bi])
        + matching_chars(&a[ai + len..], &b[bi + len..])
}

fn longest_common_run(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // Rolling row of run lengths ending at (i, j).
    let mut runs = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut prev_diag = 0usize;
        for (j, cb) in b.iter().enumerate() {
            let current = runs[j + 1];
            if ca == cb {
                let len = prev_diag + 1;
                runs[j + 1] = len;
                if len > best.2 {
                    best = (i + 1 - len, j + 1 - len, len);
                }
            } else {
                runs[j + 1] = 0;
            }
            prev_diag = current;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn known_tokens_are_never_reported() {
        let valid = refs(&["mcp_github_list_commits"]);
        let found = check_text("commands/a.md", "Use mcp_github_list_commits.", &valid);
        assert!(found.is_empty());
    }

    #[test]
    fn repeated_unknown_token_reports_first_occurrence_only() {
        let valid = refs(&["mcp_github_list_commits"]);
        let text = "intro\nmcp_github_list_commitz here\nand mcp_github_list_commitz again\n";
        let found = check_text("commands/a.md", text, &valid);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].token, "mcp_github_list_commitz");
    }

    #[test]
    fn near_miss_gets_the_valid_ref_suggested() {
        let valid = refs(&["mcp_github_list_commits"]);
        let found = check_text("a.md", "see mcp_github_list_commitss", &valid);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].suggestions, vec!["mcp_github_list_commits"]);
    }

    #[test]
    fn dissimilar_tokens_get_no_suggestions() {
        let valid = refs(&["mcp_github_list_commits"]);
        let found = check_text("a.md", "see mcp_ado-x_zzzz", &valid);
        assert_eq!(found.len(), 1);
        assert!(found[0].suggestions.is_empty());
    }

    #[test]
    fn suggestions_are_capped_at_three() {
        let valid = refs(&[
            "mcp_github_list_commits",
            "mcp_github_list_commit",
            "mcp_github_list_branches",
            "mcp_github_list_issues",
        ]);
        let found = check_text("a.md", "mcp_github_list_commitz", &valid);
        assert_eq!(found[0].suggestions.len(), 3);
        // The one-char-shorter candidate edges out the equal-length one on ratio.
        assert_eq!(found[0].suggestions[0], "mcp_github_list_commit");
        assert!(found[0]
            .suggestions
            .contains(&"mcp_github_list_commits".to_string()));
    }

    #[test]
    fn similarity_matches_difflib_behavior() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        // difflib: SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        assert!((similarity("abcd", "bcde") - 0.75).abs() < 1e-9);
    }
}
