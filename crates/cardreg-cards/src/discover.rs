//! Card and schema discovery

use std::path::Path;

use cardreg_fs::NormalizedPath;
use walkdir::WalkDir;

use crate::error::Result;

/// Find files under `dir` (relative to `repo_root`) whose name ends with `suffix`.
///
/// Returns repository-relative paths in byte order. A missing directory
/// yields nothing.
pub fn find_files(repo_root: &Path, dir: &str, suffix: &str) -> Result<Vec<NormalizedPath>> {
    let base = repo_root.join(dir);
    if !base.is_dir() {
        tracing::debug!(dir, "directory missing, nothing to discover");
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(&base) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(suffix));
        if matches {
            if let Some(rel) = NormalizedPath::relative(entry.path(), repo_root) {
                found.push(rel);
            }
        }
    }
    found.sort();
    Ok(found)
}
