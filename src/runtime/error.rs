//! Structured skillcheck error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Stable error categories for skillcheck failures.
///
/// These categories are intentionally coarse. They keep user-facing failures
/// understandable without exposing check-specific internals in the type itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LintErrorCategory {
    /// Invalid or unreadable configuration (schema documents included).
    Config,
    /// Filesystem or general I/O failure.
    Io,
    /// Invalid user input, or a check that found violations.
    Validation,
    /// A referenced file, directory, or registry entry is absent.
    NotFound,
}

/// Structured skillcheck error with contextual metadata.
///
/// The formatted display output is intentionally CLI-friendly. Optional
/// `target` and `hint` fields can be attached as the error propagates so
/// failures remain actionable at the point they are shown to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LintError {
    /// High-level error category.
    pub category: LintErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for skillcheck internals.
pub type LintResult<T> = Result<T, LintError>;

impl LintError {
    /// Create an error with the given category and message.
    pub fn new(category: LintErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(LintErrorCategory::Config, message)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(LintErrorCategory::Io, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(LintErrorCategory::Validation, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(LintErrorCategory::NotFound, message)
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for LintError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for LintError {}

impl From<std::io::Error> for LintError {
    fn from(value: std::io::Error) -> Self {
        LintError::io(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_includes_attached_context() {
        let err = LintError::config("bad schema")
            .with_path(&PathBuf::from("schemas/command.schema.json"))
            .with_hint("check the schema document");
        assert_eq!(
            err.to_string(),
            "bad schema [target: schemas/command.schema.json] [hint: check the schema document]"
        );
    }

    #[test]
    fn io_errors_convert_into_io_category() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LintError::from(io);
        assert_eq!(err.category, LintErrorCategory::Io);
        assert_eq!(err.message, "gone");
    }
}
