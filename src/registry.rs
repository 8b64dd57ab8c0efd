//! Registry Reader: the `mcps/` descriptor tree as the list of record.
//!
//! `mcps/<server>/tools/<tool>.json` is the single source of truth for valid
//! MCP tool references. Enumeration re-reads the tree on every call; callers
//! that need a stable snapshot capture the returned set once.

use crate::runtime::error::LintResult;
use crate::runtime::fs::{collect_files_with_suffix, rel_posix};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Known MCP server ids, used for reverse ref resolution.
pub const KNOWN_SERVERS: &[&str] = &["atlassian", "github", "asdlc", "ado"];

/// One enumerated tool descriptor.
///
/// `ref` is a pure function of `server` and `tool`. Duplicate refs arising
/// from distinct descriptor paths are not detected; `--list` shows both rows.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ToolDescriptor {
    /// Owning MCP server id (directory name under `mcps/`).
    pub server: String,
    /// Tool name: the file stem, unless the descriptor's `name` field overrides it.
    pub tool: String,
    /// Canonical reference string `mcp_<server>_<tool>`.
    pub r#ref: String,
    /// Descriptor path relative to the content root, forward slashes.
    pub path: String,
}

/// Enumerate `mcps/<server>/tools/*.json` in sorted order.
///
/// Enumeration never fails on malformed descriptor content: a file that does
/// not parse as JSON falls back to its stem as the tool name, so downstream
/// schema validation can still produce a precise diagnostic for it.
pub fn enumerate(root: &Path) -> LintResult<Vec<ToolDescriptor>> {
    let mcps_root = root.join("mcps");
    let mut out = Vec::new();

    for path in collect_files_with_suffix(&mcps_root, ".json")? {
        let rel = rel_posix(root, &path);
        let parts: Vec<&str> = rel.split('/').collect();
        // Expect mcps/<server>/tools/<tool>.json; anything else is not a descriptor.
        if parts.len() < 4 || parts[2] != "tools" {
            continue;
        }
        let server = parts[1].to_string();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tool = descriptor_name(&path).unwrap_or(stem);
        let r#ref = format!("mcp_{server}_{tool}");
        out.push(ToolDescriptor {
            server,
            tool,
            r#ref,
            path: rel,
        });
    }

    Ok(out)
}

fn descriptor_name(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let data: Value = serde_json::from_str(&text).ok()?;
    data.get("name")?.as_str().map(str::to_string)
}

/// The set of valid refs, recomputed from the registry tree on every call.
pub fn valid_refs(root: &Path) -> LintResult<BTreeSet<String>> {
    Ok(enumerate(root)?.into_iter().map(|t| t.r#ref).collect())
}

/// Resolve `mcp_<server>_<tool>` back to its expected descriptor path.
///
/// The candidate server is derived by testing the token against the fixed
/// [`KNOWN_SERVERS`] allow-list (first matching prefix wins); the only
/// filesystem touch is the final existence check.
pub fn resolve(root: &Path, reference: &str) -> Option<PathBuf> {
    let rest = reference.strip_prefix("mcp_")?;
    for server in KNOWN_SERVERS {
        let Some(tool) = rest.strip_prefix(&format!("{server}_")) else {
            continue;
        };
        if tool.is_empty() {
            return None;
        }
        let path = root
            .join("mcps")
            .join(server)
            .join("tools")
            .join(format!("{tool}.json"));
        return path.exists().then_some(path);
    }
    None
}
