//! The in-memory gem catalog.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::scan::find_description_files;
use super::search::SearchPath;
use crate::error::{GemError, Result};
use crate::gem::{GemDescription, GemId, GEM_DEFINITION_FILENAME};
use crate::project::{ProjectGemSpecifier, ProjectSettings};
use crate::version::{Specifier, Version};

/// Every known gem description, keyed by id then version.
///
/// Populated by scanning search paths and by loading the gems a project
/// references. Entries are never evicted; loading the same id and version
/// again replaces the earlier description. Mutating methods take
/// `&mut self` and assume a single writer.
#[derive(Debug, Clone, Default)]
pub struct GemRegistry {
    search_paths: Vec<SearchPath>,
    gems: BTreeMap<GemId, BTreeMap<Version, GemDescription>>,
    /// Entries added by `load_project`, with the description each one
    /// displaced, if any.
    project_gems: HashMap<Specifier, Option<GemDescription>>,
}

impl GemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry over `paths` and scan them.
    ///
    /// The registry is returned even when some files failed; the error
    /// carries the accumulated messages.
    pub fn scan(paths: impl IntoIterator<Item = SearchPath>) -> (Self, Option<GemError>) {
        let mut registry = Self::new();
        for path in paths {
            registry.push_search_path(path);
        }
        let error = registry.load_all_gems_from_disk().err();
        (registry, error)
    }

    pub fn search_paths(&self) -> &[SearchPath] {
        &self.search_paths
    }

    /// Register a search root. Duplicates are ignored.
    ///
    /// With `load_now`, only the new root is scanned immediately.
    pub fn add_search_path(&mut self, path: SearchPath, load_now: bool) -> Result<()> {
        if !self.push_search_path(path.clone()) {
            return Ok(());
        }
        if load_now {
            self.load_from_search_path(&path)?;
        }
        Ok(())
    }

    fn push_search_path(&mut self, path: SearchPath) -> bool {
        if self.search_paths.contains(&path) {
            debug!("Ignoring duplicate search path {}", path.root().display());
            return false;
        }
        self.search_paths.push(path);
        true
    }

    /// Forget every search root. Loaded gems stay.
    pub fn remove_search_paths(&mut self) {
        self.search_paths.clear();
    }

    /// Rescan every search root.
    ///
    /// Files that fail to parse are skipped and reported together; every
    /// description that did parse is kept.
    pub fn load_all_gems_from_disk(&mut self) -> Result<()> {
        let mut errors = Vec::new();
        for path in self.search_paths.clone() {
            if let Err(e) = self.load_from_search_path(&path) {
                errors.push(scan_message(e));
            }
        }
        info!("Registry holds {} gem versions", self.gem_count());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GemError::ScanFailed {
                message: errors.join("\n"),
            })
        }
    }

    fn load_from_search_path(&mut self, path: &SearchPath) -> Result<()> {
        let scan_dir = path.scan_dir();
        debug!("Scanning {} for gems", scan_dir.display());

        let found = find_description_files(&scan_dir);
        let mut errors = found.errors;

        for file in found.files {
            let Some(gem_dir) = file.parent() else {
                continue;
            };
            let relative = gem_dir
                .strip_prefix(path.root())
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| gem_dir.to_path_buf());

            match GemDescription::load_file(&file, &relative, gem_dir) {
                Ok(gem) => {
                    self.project_gems.remove(&gem.specifier());
                    self.add_description(gem);
                }
                Err(e) => {
                    warn!("Skipping gem at {}: {}", file.display(), e);
                    errors.push(e.to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GemError::ScanFailed {
                message: errors.join("\n"),
            })
        }
    }

    /// Insert a description, returning the one it replaced.
    pub fn add_description(&mut self, gem: GemDescription) -> Option<GemDescription> {
        debug!("Registering gem {} {} ({})", gem.name(), gem.version(), gem.id());
        self.gems
            .entry(gem.id())
            .or_default()
            .insert(gem.version(), gem)
    }

    /// Load the description of every gem `settings` enables.
    ///
    /// Each gem is looked up under the application root first, then under
    /// each search root. Any failure aborts the call and leaves the
    /// registry unchanged. With `reset_previous`, entries from an earlier
    /// project load are undone first: descriptions they displaced are put
    /// back and the rest are dropped.
    pub fn load_project(&mut self, settings: &ProjectSettings, reset_previous: bool) -> Result<()> {
        let mut loaded = Vec::with_capacity(settings.gems().len());
        for spec in settings.gems().values() {
            let gem = self.resolve_project_gem(settings.app_root(), spec)?;
            loaded.push(gem);
        }

        if reset_previous {
            for (spec, displaced) in std::mem::take(&mut self.project_gems) {
                match displaced {
                    Some(gem) => {
                        self.add_description(gem);
                    }
                    None => {
                        self.remove(spec.id, spec.version);
                    }
                }
            }
        }

        for gem in loaded {
            let spec = gem.specifier();
            let displaced = self.add_description(gem);
            self.project_gems.entry(spec).or_insert(displaced);
        }
        Ok(())
    }

    fn resolve_project_gem(&self, app_root: &Path, spec: &ProjectGemSpecifier) -> Result<GemDescription> {
        let candidates = std::iter::once(app_root.to_path_buf())
            .chain(self.search_paths.iter().map(|p| p.root().to_path_buf()));

        let mut tried: Vec<PathBuf> = Vec::new();
        for root in candidates {
            let gem_dir = root.join(&spec.path);
            let file = gem_dir.join(GEM_DEFINITION_FILENAME);
            if !file.is_file() {
                tried.push(file);
                continue;
            }

            debug!("Resolved gem {} at {}", spec.id, gem_dir.display());
            let gem = GemDescription::load_file(&file, &spec.path, &gem_dir)?;
            if gem.id() != spec.id || gem.version() != spec.version {
                return Err(GemError::DescriptionParse {
                    path: file,
                    message: format!(
                        "expected gem {} version {}, found gem {} version {}",
                        spec.id,
                        spec.version,
                        gem.id(),
                        gem.version()
                    ),
                });
            }
            return Ok(gem);
        }

        Err(GemError::DescriptionNotFound {
            path: tried
                .into_iter()
                .next()
                .unwrap_or_else(|| spec.path.join(GEM_DEFINITION_FILENAME)),
        })
    }

    fn remove(&mut self, id: GemId, version: Version) -> Option<GemDescription> {
        let versions = self.gems.get_mut(&id)?;
        let removed = versions.remove(&version);
        if versions.is_empty() {
            self.gems.remove(&id);
        }
        removed
    }

    /// Exact lookup.
    pub fn get(&self, id: GemId, version: Version) -> Option<&GemDescription> {
        self.gems.get(&id)?.get(&version)
    }

    /// Highest registered version of `id`. The zero version never counts.
    pub fn get_latest(&self, id: GemId) -> Option<&GemDescription> {
        self.gems
            .get(&id)?
            .iter()
            .rev()
            .find(|(version, _)| !version.is_zero())
            .map(|(_, gem)| gem)
    }

    /// Every registered version of `id`, ascending.
    pub fn versions_of(&self, id: GemId) -> Vec<Version> {
        self.gems
            .get(&id)
            .map(|versions| versions.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Latest version of the gem with this name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&GemDescription> {
        self.gems
            .keys()
            .filter_map(|id| self.get_latest(*id))
            .find(|gem| gem.name().eq_ignore_ascii_case(name))
    }

    pub fn all(&self) -> Vec<&GemDescription> {
        self.gems.values().flat_map(|v| v.values()).collect()
    }

    pub fn all_required(&self) -> Vec<&GemDescription> {
        self.all().into_iter().filter(|g| g.is_required()).collect()
    }

    /// Number of registered (id, version) pairs.
    pub fn gem_count(&self) -> usize {
        self.gems.values().map(|v| v.len()).sum()
    }
}

/// Unwrap nested scan failures so messages are not prefixed twice.
fn scan_message(error: GemError) -> String {
    match error {
        GemError::ScanFailed { message } => message,
        other => other.to_string(),
    }
}
