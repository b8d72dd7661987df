//! Recursive discovery of gem description files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::gem::GEM_DEFINITION_FILENAME;

/// Result of walking one directory tree.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Description files found, in walk order.
    pub files: Vec<PathBuf>,
    /// Directories that could not be read, with the reason.
    pub errors: Vec<String>,
}

/// Find every description file under `dir`.
///
/// Matching is case-insensitive on the file name. Directories containing a
/// match are still descended into, since gems may nest. Symlinked
/// directories are followed, but each real directory is walked once. A
/// missing `dir` yields an empty result.
pub fn find_description_files(dir: &Path) -> ScanResult {
    let mut result = ScanResult::default();
    if !dir.is_dir() {
        debug!("Skipping missing search directory {}", dir.display());
        return result;
    }
    let mut visited = HashSet::new();
    walk(dir, &mut result, &mut visited);
    result
}

fn walk(dir: &Path, result: &mut ScanResult, visited: &mut HashSet<PathBuf>) {
    match fs::canonicalize(dir) {
        Ok(real) => {
            if !visited.insert(real) {
                debug!("Skipping already visited directory {}", dir.display());
                return;
            }
        }
        Err(e) => {
            result
                .errors
                .push(format!("{}: cannot resolve directory: {}", dir.display(), e));
            return;
        }
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            result
                .errors
                .push(format!("{}: cannot read directory: {}", dir.display(), e));
            return;
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(e) => result
                .errors
                .push(format!("{}: cannot read entry: {}", dir.display(), e)),
        }
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            walk(&path, result, visited);
        } else if is_description_file(&path) {
            debug!("Found gem description {}", path.display());
            result.files.push(path);
        }
    }
}

fn is_description_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(GEM_DEFINITION_FILENAME))
}
