//! Which gem versions a project has enabled.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::ledger::{
    path_to_ledger, GemsLedger, LedgerEntry, ProjectDescriptor, GEMS_LEDGER_FILENAME,
    PROJECT_FILENAME,
};
use crate::error::Result;
use crate::gem::GemId;
use crate::registry::GemRegistry;
use crate::validate::{DependencyValidator, ValidationReport};
use crate::version::{Dependency, Specifier, Version};

/// A gem version enabled for a project, plus where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGemSpecifier {
    pub id: GemId,
    pub version: Version,
    /// Gem directory, relative to the application root or a search root.
    pub path: PathBuf,
}

impl ProjectGemSpecifier {
    pub fn new(id: GemId, version: Version, path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            version,
            path: path.into(),
        }
    }

    pub fn specifier(&self) -> Specifier {
        Specifier::new(self.id, self.version)
    }
}

/// Enabled gems keyed by id. One version per id.
pub type ProjectGemSpecifierMap = BTreeMap<GemId, ProjectGemSpecifier>;

/// The enabled-gem ledger of one project.
///
/// Loaded from `<app_root>/<project>/gems.json` and `project.json`.
/// Mutating methods take `&mut self`; callers sharing an instance across
/// threads must wrap it in a single mutex.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    app_root: PathBuf,
    project_dir: PathBuf,
    project_name: String,
    gems: ProjectGemSpecifierMap,
}

impl ProjectSettings {
    /// Load both project files for `<app_root>/<project_subfolder>`.
    pub fn initialize(app_root: &Path, project_subfolder: &str) -> Result<Self> {
        let project_dir = app_root.join(project_subfolder);
        let descriptor = ProjectDescriptor::load(&project_dir.join(PROJECT_FILENAME))?;
        let ledger = GemsLedger::load(&project_dir.join(GEMS_LEDGER_FILENAME))?;

        let mut gems = ProjectGemSpecifierMap::new();
        for entry in ledger.gems {
            let spec = ProjectGemSpecifier::new(entry.id, entry.version, &entry.path);
            if gems.insert(entry.id, spec).is_some() {
                debug!("Ledger lists gem {} more than once, keeping the last", entry.id);
            }
        }

        info!(
            "Loaded project '{}' with {} enabled gems",
            descriptor.project_name,
            gems.len()
        );

        Ok(Self {
            app_root: app_root.to_path_buf(),
            project_dir,
            project_name: descriptor.project_name,
            gems,
        })
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn gems_file_path(&self) -> PathBuf {
        self.project_dir.join(GEMS_LEDGER_FILENAME)
    }

    pub fn project_file_path(&self) -> PathBuf {
        self.project_dir.join(PROJECT_FILENAME)
    }

    pub fn gems(&self) -> &ProjectGemSpecifierMap {
        &self.gems
    }

    /// Replace the whole enabled set, e.g. to roll back after a failed save.
    pub fn set_gems(&mut self, gems: ProjectGemSpecifierMap) {
        self.gems = gems;
    }

    /// Enable a gem, replacing any other version of it.
    pub fn enable_gem(&mut self, spec: ProjectGemSpecifier) {
        if let Some(previous) = self.gems.get(&spec.id) {
            debug!(
                "Gem {} was enabled at {}, switching to {}",
                spec.id, previous.version, spec.version
            );
        }
        self.gems.insert(spec.id, spec);
    }

    /// Disable a gem only if exactly `spec.version` is enabled.
    ///
    /// Returns `false` and changes nothing when a different version (or no
    /// version) of the gem is enabled.
    pub fn disable_gem(&mut self, spec: &Specifier) -> bool {
        match self.gems.get(&spec.id) {
            Some(enabled) if enabled.version == spec.version => {
                self.gems.remove(&spec.id);
                true
            }
            _ => false,
        }
    }

    /// Version currently enabled for `id`.
    pub fn enabled_version(&self, id: GemId) -> Option<Version> {
        self.gems.get(&id).map(|s| s.version)
    }

    /// Whether `id` is enabled at a version meeting every constraint.
    ///
    /// Fails only if a constraint string is malformed.
    pub fn is_gem_enabled<S: AsRef<str>>(&self, id: GemId, constraints: &[S]) -> Result<bool> {
        let mut dependency = Dependency::new(id);
        dependency.parse_versions(constraints)?;
        Ok(self
            .gems
            .get(&id)
            .is_some_and(|enabled| dependency.is_fulfilled_by(&enabled.specifier())))
    }

    /// Whether exactly this gem version is enabled.
    pub fn is_gem_version_enabled(&self, spec: &Specifier) -> bool {
        self.enabled_version(spec.id) == Some(spec.version)
    }

    /// Check that every enabled gem's dependencies are met by the others.
    ///
    /// A zero `engine_version` skips engine compatibility checks. Names of
    /// gems that are not enabled are looked up by scanning the application
    /// root and the registry's search paths.
    pub fn validate_dependencies(
        &self,
        registry: &GemRegistry,
        engine_version: Version,
    ) -> ValidationReport {
        DependencyValidator::new(self, registry)
            .engine_version(engine_version)
            .name_roots(registry.search_paths().to_vec())
            .name_root(crate::registry::SearchPath::new(&self.app_root))
            .validate()
    }

    /// Build the on-disk ledger, sorted by id.
    ///
    /// Gem names are added as comments when `registry` knows the gem.
    pub fn to_ledger(&self, registry: Option<&GemRegistry>) -> GemsLedger {
        let entries = self
            .gems
            .values()
            .map(|spec| LedgerEntry {
                id: spec.id,
                version: spec.version,
                path: path_to_ledger(&spec.path),
                comment: registry
                    .and_then(|r| r.get(spec.id, spec.version))
                    .map(|gem| gem.name().to_string()),
            })
            .collect();
        GemsLedger::new(entries)
    }

    /// Write the enabled set back to `gems.json`.
    pub fn save(&self, registry: Option<&GemRegistry>) -> Result<()> {
        let path = self.gems_file_path();
        let json = self.to_ledger(registry).to_json()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, json + "\n")?;
        info!("Saved {} enabled gems to {}", self.gems.len(), path.display());
        Ok(())
    }
}
