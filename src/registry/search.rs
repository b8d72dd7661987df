//! Search roots for gem discovery.

use std::path::{Path, PathBuf};

/// A directory to scan for gem descriptions.
///
/// `filter` optionally narrows the scan to one subdirectory of `root`
/// (usually `Gems`); relative gem paths are still computed against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchPath {
    root: PathBuf,
    filter: Option<String>,
}

impl SearchPath {
    /// Create a search path, dropping trailing path separators.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize(root.as_ref()),
            filter: None,
        }
    }

    /// Create a search path narrowed to one subdirectory.
    pub fn with_filter(root: impl AsRef<Path>, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        let filter = filter.trim_matches(['/', '\\']).to_string();
        Self {
            root: normalize(root.as_ref()),
            filter: (!filter.is_empty()).then_some(filter),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Directory where scanning starts.
    pub fn scan_dir(&self) -> PathBuf {
        match &self.filter {
            Some(filter) => self.root.join(filter),
            None => self.root.clone(),
        }
    }
}

fn normalize(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    let trimmed = text.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        // Keep filesystem roots like "/" intact.
        path.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separators_are_dropped() {
        assert_eq!(SearchPath::new("/engine/").root(), Path::new("/engine"));
        assert_eq!(SearchPath::new("/engine//").root(), Path::new("/engine"));
        assert_eq!(SearchPath::new("/").root(), Path::new("/"));
    }

    #[test]
    fn equal_after_normalization() {
        assert_eq!(SearchPath::new("/engine/"), SearchPath::new("/engine"));
        assert_ne!(
            SearchPath::new("/engine"),
            SearchPath::with_filter("/engine", "Gems")
        );
    }

    #[test]
    fn filter_selects_scan_dir() {
        let path = SearchPath::with_filter("/engine", "Gems/");
        assert_eq!(path.filter(), Some("Gems"));
        assert_eq!(path.scan_dir(), PathBuf::from("/engine/Gems"));
        assert_eq!(SearchPath::with_filter("/engine", "").filter(), None);
    }
}
