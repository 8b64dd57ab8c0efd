//! Finding records and deterministic diagnostic output.

use crate::runtime::error::{LintError, LintResult};

/// One finding from a check, qualified by file and optional line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Problem {
    /// Short check label (`schema`, `mcp-refs`, `links`, `install`, ...).
    pub check: String,
    /// Root-relative path of the offending file or directory.
    pub path: String,
    /// Human-readable finding.
    pub message: String,
    /// 1-indexed line number when the finding is line-qualified.
    pub line: Option<usize>,
}

impl Problem {
    /// Create a finding.
    pub fn new(
        check: &str,
        path: impl Into<String>,
        message: impl Into<String>,
        line: Option<usize>,
    ) -> Self {
        Self {
            check: check.to_string(),
            path: path.into(),
            message: message.into(),
            line,
        }
    }
}

/// Print findings to stderr, one labeled row per finding.
///
/// Findings are printed in the order they were collected: checks enumerate
/// files in sorted order and scan each file top to bottom, so the output is
/// already deterministic and re-sorting would break within-file ordering.
pub fn print_problems(problems: &[Problem]) {
    for p in problems {
        let loc = match p.line {
            Some(line) => format!("{}:{line}", p.path),
            None => p.path.clone(),
        };
        eprintln!("[{}] {} - {}", p.check, loc, p.message);
    }
}

/// Print `ok_message` and succeed when there are no findings; otherwise print
/// every finding plus a failure tally and return a validation error.
pub fn fail_if_problems(problems: Vec<Problem>, ok_message: &str) -> LintResult<()> {
    if problems.is_empty() {
        println!("{ok_message}");
        return Ok(());
    }
    print_problems(&problems);
    eprintln!("\nFAILED: {} issue(s)", problems.len());
    Err(LintError::validation("validation failed"))
}
