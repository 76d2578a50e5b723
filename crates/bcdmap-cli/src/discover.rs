//! Candidate file discovery under a root path
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::CliError;

/// Dependency directory never descended into
pub const EXCLUDED_DIR: &str = "node_modules";

/// Every `*.json` file under `root`, sorted by path.
///
/// Hidden files and directories (leading `.`) are skipped. A root that is itself a file is returned as-is.
pub fn discover_documents(root: &Path) -> Result<Vec<PathBuf>, CliError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && is_json(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_excluded(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name();
    name.to_str().is_some_and(|n| n.starts_with('.'))
        || (entry.file_type().is_dir() && name == EXCLUDED_DIR)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
