//! Parsed gem metadata.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::id::GemId;
use super::module::{LinkType, ModuleDefinition, ModuleId, ModuleType};
use super::schema::{
    upgrade_description, RawDependency, RawGemDescription, RawModule, GEM_DEFINITION_FILENAME,
};
use crate::error::{GemError, Result};
use crate::version::{Dependency, Specifier, Version};

/// Immutable metadata for one gem, built from its description file.
#[derive(Debug, Clone)]
pub struct GemDescription {
    id: GemId,
    name: String,
    display_name: String,
    version: Version,
    path: PathBuf,
    absolute_path: PathBuf,
    summary: String,
    icon_path: String,
    tags: Vec<String>,
    modules: Vec<ModuleDefinition>,
    modules_by_type: HashMap<ModuleType, Vec<ModuleId>>,
    engine_module_class: String,
    dependencies: Vec<Dependency>,
    engine_dependency: Option<Dependency>,
    is_game_gem: bool,
    is_required: bool,
    legacy_module_init: bool,
}

impl GemDescription {
    /// Read and parse `<absolute_path>/gem.json`.
    ///
    /// `path` is the gem directory relative to whichever root it was found
    /// under; it is stored as-is.
    pub fn load(path: &Path, absolute_path: &Path) -> Result<Self> {
        Self::load_file(
            &absolute_path.join(GEM_DEFINITION_FILENAME),
            path,
            absolute_path,
        )
    }

    /// Read and parse a specific description file.
    ///
    /// Scans match the file name case-insensitively, so the file on disk
    /// may be spelled differently from [`GEM_DEFINITION_FILENAME`].
    pub fn load_file(file: &Path, path: &Path, absolute_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GemError::DescriptionNotFound {
                    path: file.to_path_buf(),
                }
            } else {
                GemError::Io(e)
            }
        })?;
        Self::parse_str(&content, path, absolute_path)
    }

    /// Parse description JSON text.
    pub fn parse_str(content: &str, path: &Path, absolute_path: &Path) -> Result<Self> {
        let doc: Value = serde_json::from_str(content).map_err(|e| GemError::DescriptionParse {
            path: absolute_path.join(GEM_DEFINITION_FILENAME),
            message: e.to_string(),
        })?;
        Self::from_json(&doc, path, absolute_path)
    }

    /// Upgrade and parse a description document.
    pub fn from_json(doc: &Value, path: &Path, absolute_path: &Path) -> Result<Self> {
        let file = absolute_path.join(GEM_DEFINITION_FILENAME);
        let upgraded = upgrade_description(doc, &file)?;
        let raw: RawGemDescription =
            serde_json::from_value(upgraded).map_err(|e| GemError::DescriptionParse {
                path: file.clone(),
                message: e.to_string(),
            })?;
        build(raw, path, absolute_path).map_err(|message| GemError::DescriptionParse {
            path: file,
            message,
        })
    }

    pub fn id(&self) -> GemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn specifier(&self) -> Specifier {
        Specifier::new(self.id, self.version)
    }

    /// Gem directory relative to the root it was found under.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn icon_path(&self) -> &str {
        &self.icon_path
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn engine_module_class(&self) -> &str {
        &self.engine_module_class
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Constraint on the host engine version, if the gem declares one.
    pub fn engine_dependency(&self) -> Option<&Dependency> {
        self.engine_dependency.as_ref()
    }

    pub fn is_game_gem(&self) -> bool {
        self.is_game_gem
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Whether the gem came from a format-2 description.
    pub fn legacy_module_init(&self) -> bool {
        self.legacy_module_init
    }

    pub fn modules(&self) -> &[ModuleDefinition] {
        &self.modules
    }

    pub fn module(&self, id: ModuleId) -> &ModuleDefinition {
        &self.modules[id.0]
    }

    pub fn module_by_name(&self, name: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Modules to load for a given role.
    ///
    /// A game module with no editor module extending it is also listed
    /// under [`ModuleType::EditorModule`].
    pub fn modules_of_type(&self, module_type: ModuleType) -> Vec<&ModuleDefinition> {
        self.modules_by_type
            .get(&module_type)
            .map(|ids| ids.iter().map(|id| &self.modules[id.0]).collect())
            .unwrap_or_default()
    }

    pub fn parent_of(&self, module: &ModuleDefinition) -> Option<&ModuleDefinition> {
        module.parent.map(|id| &self.modules[id.0])
    }

    pub fn children_of(&self, module: &ModuleDefinition) -> Vec<&ModuleDefinition> {
        module.children.iter().map(|id| &self.modules[id.0]).collect()
    }

    /// The module whose file name carries no module segment.
    pub fn default_module(&self) -> Option<&ModuleDefinition> {
        default_module_index(&self.modules).map(|i| &self.modules[i])
    }
}

fn build(
    raw: RawGemDescription,
    path: &Path,
    absolute_path: &Path,
) -> std::result::Result<GemDescription, String> {
    let id = GemId::parse_non_nil(&raw.uuid)
        .map_err(|_| format!("field `Uuid`: '{}' is not a valid gem id", raw.uuid))?;
    let version = Version::parse(&raw.version).map_err(|e| format!("field `Version`: {}", e))?;

    if raw.name.is_empty() {
        return Err("field `Name` must not be empty".to_string());
    }

    let engine_dependency = match raw.lumberyard_version.map(|v| v.into_vec()) {
        None => None,
        Some(constraints) if constraints.is_empty() => None,
        Some(constraints) => {
            let mut dependency = Dependency::new(GemId::NIL);
            dependency
                .parse_versions(&constraints)
                .map_err(|e| format!("field `LumberyardVersion`: {}", e))?;
            Some(dependency)
        }
    };

    let dependencies = raw
        .dependencies
        .iter()
        .enumerate()
        .map(|(i, d)| parse_dependency(i, d))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let modules = build_modules(&raw.modules, &raw.name, id, version)?;
    let modules_by_type = index_modules(&modules);

    let display_name = match raw.display_name {
        Some(display) if !display.is_empty() => display,
        _ => raw.name.clone(),
    };
    let engine_module_class = raw
        .engine_module_class
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| format!("{}Gem", raw.name));

    Ok(GemDescription {
        id,
        name: raw.name,
        display_name,
        version,
        path: path.to_path_buf(),
        absolute_path: absolute_path.to_path_buf(),
        summary: raw.summary,
        icon_path: raw.icon_path,
        tags: raw.tags,
        modules,
        modules_by_type,
        engine_module_class,
        dependencies,
        engine_dependency,
        is_game_gem: raw.is_game_gem,
        is_required: raw.is_required,
        legacy_module_init: raw.is_legacy_module_init,
    })
}

fn parse_dependency(index: usize, raw: &RawDependency) -> std::result::Result<Dependency, String> {
    let id = GemId::parse_non_nil(&raw.uuid).map_err(|_| {
        format!(
            "`Dependencies[{}].Uuid`: '{}' is not a valid gem id",
            index, raw.uuid
        )
    })?;
    if raw.version_constraints.is_empty() {
        return Err(format!(
            "`Dependencies[{}].VersionConstraints` must list at least one constraint",
            index
        ));
    }
    let mut dependency = Dependency::new(id);
    dependency
        .parse_versions(&raw.version_constraints)
        .map_err(|e| format!("`Dependencies[{}].VersionConstraints`: {}", index, e))?;
    Ok(dependency)
}

fn build_modules(
    raw_modules: &[RawModule],
    gem_name: &str,
    gem_id: GemId,
    version: Version,
) -> std::result::Result<Vec<ModuleDefinition>, String> {
    let mut modules: Vec<ModuleDefinition> = Vec::with_capacity(raw_modules.len());
    let mut names = HashSet::new();

    for (i, raw) in raw_modules.iter().enumerate() {
        let module_type = ModuleType::from_name(&raw.module_type).ok_or_else(|| {
            format!(
                "`Modules[{}].Type`: unknown module type '{}'",
                i, raw.module_type
            )
        })?;

        let name = match &raw.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ if module_type.has_default_name() => module_type.as_str().to_string(),
            _ => {
                return Err(format!(
                    "`Modules[{}].Name` is required for modules of type {}",
                    i, module_type
                ))
            }
        };

        if !names.insert(name.clone()) {
            return Err(format!("duplicate module name '{}'", name));
        }

        let parent = match &raw.extends {
            None => None,
            Some(target) => {
                if !module_type.can_extend() {
                    return Err(format!(
                        "module '{}' of type {} cannot extend other modules",
                        name, module_type
                    ));
                }
                let index = modules
                    .iter()
                    .position(|m| &m.name == target)
                    .ok_or_else(|| {
                        format!(
                            "module '{}' extends '{}', which is not declared before it",
                            name, target
                        )
                    })?;
                if !modules[index].module_type.is_extendable() {
                    return Err(format!(
                        "module '{}' extends '{}' of type {}, which cannot be extended",
                        name, target, modules[index].module_type
                    ));
                }
                Some(ModuleId(index))
            }
        };

        let id = ModuleId(modules.len());
        if let Some(parent) = parent {
            modules[parent.0].children.push(id);
        }

        modules.push(ModuleDefinition {
            name,
            module_type,
            link_type: raw.link_type.unwrap_or(LinkType::Dynamic),
            file_name: None,
            parent,
            children: Vec::new(),
        });
    }

    let default = default_module_index(&modules);
    for (i, module) in modules.iter_mut().enumerate() {
        if module.module_type == ModuleType::StaticLib {
            continue;
        }
        let segment = if default == Some(i) {
            String::new()
        } else {
            format!(".{}", module.name)
        };
        module.file_name = Some(format!(
            "Gem.{}{}.{}.v{}",
            gem_name, segment, gem_id, version
        ));
    }

    Ok(modules)
}

/// The game module named after its type, else the server module named after
/// its type.
fn default_module_index(modules: &[ModuleDefinition]) -> Option<usize> {
    [ModuleType::GameModule, ModuleType::ServerModule]
        .into_iter()
        .find_map(|t| {
            modules
                .iter()
                .position(|m| m.module_type == t && m.name == t.as_str())
        })
}

fn index_modules(modules: &[ModuleDefinition]) -> HashMap<ModuleType, Vec<ModuleId>> {
    let mut index: HashMap<ModuleType, Vec<ModuleId>> = HashMap::new();
    for (i, module) in modules.iter().enumerate() {
        index.entry(module.module_type).or_default().push(ModuleId(i));
    }

    for (i, module) in modules.iter().enumerate() {
        let has_editor_child = module
            .children
            .iter()
            .any(|c| modules[c.0].module_type == ModuleType::EditorModule);
        if module.module_type == ModuleType::GameModule && !has_editor_child {
            index
                .entry(ModuleType::EditorModule)
                .or_default()
                .push(ModuleId(i));
        }
    }

    index
}
