//! Build outputs a gem declares.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of build output a module produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleType {
    GameModule,
    ServerModule,
    EditorModule,
    StaticLib,
    Builder,
    Standalone,
}

impl ModuleType {
    pub const ALL: [ModuleType; 6] = [
        ModuleType::GameModule,
        ModuleType::ServerModule,
        ModuleType::EditorModule,
        ModuleType::StaticLib,
        ModuleType::Builder,
        ModuleType::Standalone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::GameModule => "GameModule",
            ModuleType::ServerModule => "ServerModule",
            ModuleType::EditorModule => "EditorModule",
            ModuleType::StaticLib => "StaticLib",
            ModuleType::Builder => "Builder",
            ModuleType::Standalone => "Standalone",
        }
    }

    /// Exact, case-sensitive match against the type names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    /// Game and server modules may be left unnamed; their type is the name.
    pub fn has_default_name(&self) -> bool {
        matches!(self, ModuleType::GameModule | ModuleType::ServerModule)
    }

    /// Whether a module of this type may be the target of `Extends`.
    pub fn is_extendable(&self) -> bool {
        matches!(self, ModuleType::GameModule | ModuleType::ServerModule)
    }

    /// Whether a module of this type may declare `Extends`.
    pub fn can_extend(&self) -> bool {
        matches!(self, ModuleType::EditorModule | ModuleType::ServerModule)
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a module is linked into the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkType {
    #[default]
    Dynamic,
    DynamicStatic,
    NoCode,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Dynamic => "Dynamic",
            LinkType::DynamicStatic => "DynamicStatic",
            LinkType::NoCode => "NoCode",
        }
    }
}

/// Index of a module inside its owning [`GemDescription`](super::GemDescription).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(pub(crate) usize);

impl ModuleId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One module of a gem.
///
/// Extension links are stored as indices into the owning gem's module list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDefinition {
    pub(crate) name: String,
    pub(crate) module_type: ModuleType,
    pub(crate) link_type: LinkType,
    pub(crate) file_name: Option<String>,
    pub(crate) parent: Option<ModuleId>,
    pub(crate) children: Vec<ModuleId>,
}

impl ModuleDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_type(&self) -> ModuleType {
        self.module_type
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    /// On-disk base name of the built library. `None` for static libraries.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// The module this one extends, if any.
    pub fn parent(&self) -> Option<ModuleId> {
        self.parent
    }

    /// Modules that extend this one.
    pub fn children(&self) -> &[ModuleId] {
        &self.children
    }
}
