use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn read_projects(path: &Path) -> Result<Value> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

/// Copy `path` to `<file name>.bak-<stamp>` in the same directory.
pub fn backup(path: &Path, stamp: &str) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("projects.json");
    let backup_path = path.with_file_name(format!("{file_name}.bak-{stamp}"));
    fs::copy(path, &backup_path).with_context(|| {
        format!(
            "failed to back up {} to {}",
            path.display(),
            backup_path.display()
        )
    })?;
    Ok(backup_path)
}

pub fn backup_stamp() -> String {
    chrono::Local::now().format("%Y%m%dT%H%M%S").to_string()
}

/// Pretty-print `document` with two-space indentation and replace the file
/// behind `path` through a sibling temp file. Symlinks are followed and the
/// existing permissions are carried over. Non-ASCII text is written as-is.
pub fn write_projects(path: &Path, document: &Value) -> Result<()> {
    let data = serde_json::to_string_pretty(document)?;
    let target = match fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(_) => path.to_path_buf(),
    };
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(data.as_bytes())
        .with_context(|| format!("failed to write temp file for {}", target.display()))?;
    if let Ok(meta) = fs::metadata(&target) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .with_context(|| format!("failed to copy permissions of {}", target.display()))?;
    }
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("failed to flush temp file for {}", target.display()))?;
    tmp.persist(&target)
        .with_context(|| format!("failed to replace {}", target.display()))?;

    Ok(())
}
