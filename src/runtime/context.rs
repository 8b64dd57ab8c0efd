//! Shared command context passed into command families.

use crate::runtime::error::{LintError, LintResult};
use std::path::{Path, PathBuf};

/// Shared execution context for skillcheck command families.
///
/// The context carries the content-repository root and derived directory
/// locations. Every check reads fresh from disk through this root; nothing is
/// cached between invocations.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
}

impl CommandContext {
    /// Create a context rooted at the current working directory.
    pub fn new() -> LintResult<Self> {
        let root = std::env::current_dir()
            .map_err(|err| LintError::io(format!("failed to resolve working directory: {err}")))?;
        Ok(Self { root })
    }

    /// Create a context rooted at an explicit content-repository root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content-repository root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the two schema documents.
    pub fn schemas_dir(&self) -> PathBuf {
        self.root.join("schemas")
    }

    /// Directory holding command markdown documents.
    pub fn commands_dir(&self) -> PathBuf {
        self.root.join("commands")
    }

    /// Directory holding skill subdirectories.
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    /// Root of the MCP tool descriptor registry.
    pub fn mcps_dir(&self) -> PathBuf {
        self.root.join("mcps")
    }

    /// Resolve a user-supplied path against the content root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
