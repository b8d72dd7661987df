//! Shared loading for commands.
//!
//! Every command that reads gems opens a [`Workspace`]: the tool config,
//! a registry scanned from the configured search paths, and the selected
//! project when there is one.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{load_config, ToolConfig};
use crate::error::{GemError, Result};
use crate::gem::{GemDescription, GemId};
use crate::project::ProjectSettings;
use crate::registry::GemRegistry;
use crate::ui::UserInterface;
use crate::version::Version;

use super::dispatcher::CommandResult;

/// Exit code for a missing or broken project setup.
pub const SETUP_EXIT_CODE: i32 = 2;

/// Where to load from, as chosen on the command line.
#[derive(Debug, Clone)]
pub struct WorkspaceOptions {
    pub app_root: PathBuf,
    /// Project subfolder; falls back to the config file.
    pub project: Option<String>,
}

impl WorkspaceOptions {
    pub fn new(app_root: impl Into<PathBuf>, project: Option<String>) -> Self {
        Self {
            app_root: app_root.into(),
            project,
        }
    }
}

/// Loaded config, registry, and project.
pub struct Workspace {
    app_root: PathBuf,
    config: ToolConfig,
    pub registry: GemRegistry,
    pub settings: Option<ProjectSettings>,
    warnings: Vec<String>,
}

impl Workspace {
    /// Load config, scan gems, and load the project if one is selected.
    ///
    /// Scan failures and gems the project cannot resolve become warnings.
    pub fn open(options: &WorkspaceOptions) -> Result<Self> {
        let app_root = options.app_root.clone();
        let config = load_config(&app_root)?;
        let mut warnings = Vec::new();

        let (mut registry, scan_error) = GemRegistry::scan(config.search_paths(&app_root));
        if let Some(e) = scan_error {
            warnings.push(e.to_string());
        }

        let project = options.project.clone().or_else(|| config.project.clone());
        let settings = match project {
            Some(name) => {
                let settings = ProjectSettings::initialize(&app_root, &name)?;
                if let Err(e) = registry.load_project(&settings, false) {
                    warnings.push(format!("Some enabled gems could not be loaded: {}", e));
                }
                Some(settings)
            }
            None => None,
        };

        debug!(
            "Opened workspace at {} with {} gem versions",
            app_root.display(),
            registry.gem_count()
        );

        Ok(Self {
            app_root,
            config,
            registry,
            settings,
            warnings,
        })
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Show accumulated load warnings.
    pub fn report_warnings(&self, ui: &mut dyn UserInterface) {
        for warning in &self.warnings {
            ui.warning(warning);
        }
    }

    /// Resolve a gem name or id to an id, checking the registry for names.
    pub fn resolve_id(&self, query: &str) -> Option<GemId> {
        if let Ok(id) = GemId::parse_non_nil(query) {
            return Some(id);
        }
        self.registry.find_by_name(query).map(|gem| gem.id())
    }

    /// Find a registered description by name or id.
    ///
    /// Without a version the latest registered one is returned.
    pub fn find_gem(&self, query: &str, version: Option<Version>) -> Option<&GemDescription> {
        let id = self.resolve_id(query)?;
        match version {
            Some(version) => self.registry.get(id, version),
            None => self.registry.get_latest(id),
        }
    }

    /// Path to record in the ledger for a gem: relative to the
    /// application root when the gem lives under it.
    pub fn ledger_path(&self, gem: &GemDescription) -> PathBuf {
        gem.absolute_path()
            .strip_prefix(&self.app_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| gem.path().to_path_buf())
    }
}

/// Turn setup errors into exit code 2; pass everything else on.
pub fn setup_failure(ui: &mut dyn UserInterface, error: GemError) -> Result<CommandResult> {
    match error {
        GemError::ProjectFileNotFound { .. }
        | GemError::LedgerParse { .. }
        | GemError::ConfigParseError { .. } => {
            ui.error(&error.to_string());
            Ok(CommandResult::failure(SETUP_EXIT_CODE))
        }
        other => Err(other),
    }
}

/// Report that a command needs a project.
pub fn missing_project(ui: &mut dyn UserInterface) -> CommandResult {
    ui.error("No project selected. Pass --project or set `project` in .gemreg/config.yml.");
    CommandResult::failure(SETUP_EXIT_CODE)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn opens_without_project() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let ws = Workspace::open(&WorkspaceOptions::new(temp.path(), None)).unwrap();
        assert!(ws.settings.is_none());
        assert_eq!(ws.registry.gem_count(), 2);
    }

    #[test]
    fn resolves_by_name_or_id() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let ws = Workspace::open(&WorkspaceOptions::new(temp.path(), None)).unwrap();

        let by_name = ws.find_gem("camera", None).unwrap();
        let by_id = ws.find_gem(CAMERA_ID, None).unwrap();
        assert_eq!(by_name.id(), by_id.id());
        assert!(ws.find_gem("Camera", Some(Version::new(9, 0, 0))).is_none());
        assert!(ws.find_gem("Nope", None).is_none());
    }

    #[test]
    fn ledger_path_is_relative_to_app_root() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let ws = Workspace::open(&WorkspaceOptions::new(temp.path(), None)).unwrap();
        let gem = ws.find_gem("Camera", None).unwrap();
        assert_eq!(ws.ledger_path(gem), Path::new("Gems").join("Camera"));
    }

    #[test]
    fn missing_project_files_are_setup_failures() {
        let temp = TempDir::new().unwrap();
        let err = Workspace::open(&WorkspaceOptions::new(temp.path(), Some("Nope".into())))
            .err()
            .unwrap();
        let mut ui = MockUI::new();
        let result = setup_failure(&mut ui, err).unwrap();
        assert_eq!(result.exit_code, SETUP_EXIT_CODE);
        assert!(ui.has_error("project.json"));
    }

    #[test]
    fn broken_gems_become_warnings() {
        let temp = TempDir::new().unwrap();
        write_workspace(temp.path());
        let bad = temp.path().join("Gems").join("Broken");
        std::fs::create_dir_all(&bad).unwrap();
        std::fs::write(bad.join("gem.json"), "{ not json").unwrap();

        let ws = Workspace::open(&WorkspaceOptions::new(temp.path(), None)).unwrap();
        let mut ui = MockUI::new();
        ws.report_warnings(&mut ui);
        assert_eq!(ui.warnings().len(), 1);
        assert_eq!(ws.registry.gem_count(), 2);
    }
}
