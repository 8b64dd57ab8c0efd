//! Shared filesystem helpers for skillcheck checks.

use crate::runtime::error::{LintError, LintResult};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Read a text file, tagging the error with the offending path.
pub fn read_text(path: &Path) -> LintResult<String> {
    fs::read_to_string(path)
        .map_err(|err| LintError::io(format!("failed to read {}: {err}", path.display())))
}

/// Recursively collect files under `root` whose name ends with `suffix`,
/// sorted for deterministic enumeration. A missing root yields an empty list.
pub fn collect_files_with_suffix(root: &Path, suffix: &str) -> LintResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !root.exists() {
        return Ok(out);
    }
    collect_files_with_suffix_inner(root, suffix, &mut out)?;
    out.sort();
    Ok(out)
}

fn collect_files_with_suffix_inner(
    root: &Path,
    suffix: &str,
    out: &mut Vec<PathBuf>,
) -> LintResult<()> {
    let mut entries: Vec<_> = fs::read_dir(root)
        .map_err(|err| LintError::io(format!("failed to read {}: {err}", root.display())))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| LintError::io(format!("failed to read {}: {err}", root.display())))?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_files_with_suffix_inner(&path, suffix, out)?;
        } else if path.is_file() && path.to_string_lossy().ends_with(suffix) {
            out.push(path);
        }
    }

    Ok(())
}

/// Collect the immediate `.md` files of a directory (non-recursive), sorted.
pub fn collect_top_level_markdown(dir: &Path) -> LintResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !dir.exists() {
        return Ok(out);
    }
    let entries = fs::read_dir(dir)
        .map_err(|err| LintError::io(format!("failed to read {}: {err}", dir.display())))?;
    for entry in entries {
        let entry =
            entry.map_err(|err| LintError::io(format!("failed to read {}: {err}", dir.display())))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Sorted immediate subdirectories of `dir`.
pub fn collect_subdirectories(dir: &Path) -> LintResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    if !dir.exists() {
        return Ok(out);
    }
    let entries = fs::read_dir(dir)
        .map_err(|err| LintError::io(format!("failed to read {}: {err}", dir.display())))?;
    for entry in entries {
        let entry =
            entry.map_err(|err| LintError::io(format!("failed to read {}: {err}", dir.display())))?;
        let path = entry.path();
        if path.is_dir() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Root-relative path rendered with forward slashes, for stable diagnostics.
pub fn rel_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => Some(".".to_string()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "skillcheck-fs-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    #[test]
    fn collect_files_is_sorted_and_recursive() {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("b/tools")).expect("mkdir");
        fs::create_dir_all(root.join("a/tools")).expect("mkdir");
        fs::write(root.join("b/tools/z.json"), "{}").expect("write");
        fs::write(root.join("a/tools/m.json"), "{}").expect("write");
        fs::write(root.join("a/notes.txt"), "x").expect("write");

        let files = collect_files_with_suffix(&root, ".json").expect("collect");
        assert_eq!(
            files,
            vec![root.join("a/tools/m.json"), root.join("b/tools/z.json")]
        );
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn collect_files_on_missing_root_is_empty() {
        let root = unique_temp_root();
        assert!(collect_files_with_suffix(&root, ".json")
            .expect("collect")
            .is_empty());
    }

    #[test]
    fn top_level_markdown_skips_nested_files() {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("nested")).expect("mkdir");
        fs::write(root.join("a.md"), "a").expect("write");
        fs::write(root.join("nested/b.md"), "b").expect("write");
        fs::write(root.join("c.txt"), "c").expect("write");

        let files = collect_top_level_markdown(&root).expect("collect");
        assert_eq!(files, vec![root.join("a.md")]);
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn rel_posix_uses_forward_slashes() {
        let root = PathBuf::from("/repo");
        let path = PathBuf::from("/repo/mcps/github/tools/list_commits.json");
        assert_eq!(rel_posix(&root, &path), "mcps/github/tools/list_commits.json");
    }
}
