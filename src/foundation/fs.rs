use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::OrbitResult;

/// Regular files in `dir` whose name ends with one of `suffixes`, sorted by file name.
///
/// Matching is case-sensitive and not recursive.
pub(crate) fn list_files_with_suffix(dir: &Path, suffixes: &[&str]) -> OrbitResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory '{}'", dir.display()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !suffixes.iter().any(|s| name.ends_with(s)) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
