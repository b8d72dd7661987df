//! Dependency-closure check over a project's enabled gems.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::report::{ValidationError, ValidationErrorKind, ValidationReport};
use crate::gem::{GemDescription, GemId};
use crate::project::ProjectSettings;
use crate::registry::{GemRegistry, SearchPath};
use crate::version::{Dependency, Specifier, Version};

/// Requirements on one target gem, merged across all dependents.
#[derive(Debug)]
struct GlobalDependency {
    merged: Dependency,
    /// Each dependent with its own, unmerged dependency.
    dependents: Vec<(Specifier, Dependency)>,
}

/// Checks that every enabled gem's dependencies are met by other enabled
/// gems, and optionally that each gem accepts the engine version.
///
/// Engine-version mismatches fail validation just like gem mismatches.
pub struct DependencyValidator<'a> {
    settings: &'a ProjectSettings,
    registry: &'a GemRegistry,
    engine_version: Version,
    name_roots: Vec<SearchPath>,
}

impl<'a> DependencyValidator<'a> {
    pub fn new(settings: &'a ProjectSettings, registry: &'a GemRegistry) -> Self {
        Self {
            settings,
            registry,
            engine_version: Version::ZERO,
            name_roots: Vec::new(),
        }
    }

    /// Engine version to check against. Zero skips the check.
    pub fn engine_version(mut self, version: Version) -> Self {
        self.engine_version = version;
        self
    }

    /// Roots scanned to name gems that are required but not enabled.
    pub fn name_roots(mut self, roots: Vec<SearchPath>) -> Self {
        for root in roots {
            self = self.name_root(root);
        }
        self
    }

    pub fn name_root(mut self, root: SearchPath) -> Self {
        if !self.name_roots.contains(&root) {
            self.name_roots.push(root);
        }
        self
    }

    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut enabled: Vec<&GemDescription> = Vec::new();

        for spec in self.settings.gems().values() {
            match self.registry.get(spec.id, spec.version) {
                Some(gem) => enabled.push(gem),
                None => report.push_error(ValidationError {
                    dependent_id: spec.id,
                    target_id: spec.id,
                    kind: ValidationErrorKind::UnknownGem,
                    detail: format!(
                        "Enabled gem {} version {} was not found in the registry.",
                        spec.id, spec.version
                    ),
                }),
            }
        }

        let table = build_global_table(&enabled);
        self.check_engine(&enabled, &mut report);

        let mut fallback: Option<GemRegistry> = None;
        for (target_id, entry) in &table {
            if !entry.merged.is_satisfiable() {
                report.push_warning(format!(
                    "No version of {} can satisfy the combined constraints {}",
                    self.target_name(*target_id, &mut fallback),
                    entry.merged.bounds_string()
                ));
            }

            match self.settings.enabled_version(*target_id) {
                None => {
                    let target = self.target_name(*target_id, &mut fallback);
                    for (dependent, _) in &entry.dependents {
                        report.push_error(ValidationError {
                            dependent_id: dependent.id,
                            target_id: *target_id,
                            kind: ValidationErrorKind::MissingDependency,
                            detail: format!(
                                "{} depends on {}, which is not enabled.",
                                self.dependent_name(dependent),
                                target
                            ),
                        });
                    }
                }
                Some(version) if !entry.merged.is_met_by(version) => {
                    let target = self.target_name(*target_id, &mut fallback);
                    let failing = entry.dependents.iter().filter(|(_, d)| !d.is_met_by(version));
                    for (dependent, _) in failing {
                        report.push_error(ValidationError {
                            dependent_id: dependent.id,
                            target_id: *target_id,
                            kind: ValidationErrorKind::VersionMismatch,
                            detail: format!(
                                "{} depends on {} with version constraints {}, but version {} is enabled.",
                                self.dependent_name(dependent),
                                target,
                                entry.merged.bounds_string(),
                                version
                            ),
                        });
                    }
                }
                Some(_) => {}
            }
        }

        debug!(
            "Validated {} enabled gems: {} errors, {} warnings",
            enabled.len(),
            report.errors().len(),
            report.warnings().len()
        );
        report
    }

    fn check_engine(&self, enabled: &[&GemDescription], report: &mut ValidationReport) {
        if self.engine_version.is_zero() {
            return;
        }
        for gem in enabled {
            let Some(engine) = gem.engine_dependency() else {
                continue;
            };
            if engine.is_met_by(self.engine_version) {
                continue;
            }
            let detail = format!(
                "Gem \"{}\" requires engine version {}, but the engine version is {}.",
                gem.display_name(),
                engine.bounds_string(),
                self.engine_version
            );
            warn!("{}", detail);
            report.push_error(ValidationError {
                dependent_id: gem.id(),
                target_id: GemId::NIL,
                kind: ValidationErrorKind::EngineVersionMismatch,
                detail,
            });
        }
    }

    fn dependent_name(&self, spec: &Specifier) -> String {
        match self.registry.get(spec.id, spec.version) {
            Some(gem) => format!("Gem \"{}\" ({})", gem.display_name(), spec.version),
            None => format!("Gem {} ({})", spec.id, spec.version),
        }
    }

    /// Name a target gem, scanning the name roots only when needed.
    fn target_name(&self, id: GemId, fallback: &mut Option<GemRegistry>) -> String {
        if let Some(gem) = self.registry.get_latest(id) {
            return format!("gem \"{}\"", gem.display_name());
        }
        let names = fallback.get_or_insert_with(|| {
            debug!("Scanning {} roots to name missing gems", self.name_roots.len());
            let (registry, error) = GemRegistry::scan(self.name_roots.iter().cloned());
            if let Some(e) = error {
                debug!("Name lookup scan had failures: {}", e);
            }
            registry
        });
        match names.get_latest(id) {
            Some(gem) => format!("gem \"{}\" ({})", gem.display_name(), id),
            None => format!("gem {}", id),
        }
    }
}

/// Merge every enabled gem's dependencies by target id.
fn build_global_table(enabled: &[&GemDescription]) -> BTreeMap<GemId, GlobalDependency> {
    let mut table: BTreeMap<GemId, GlobalDependency> = BTreeMap::new();
    for gem in enabled {
        for dependency in gem.dependencies() {
            let entry = table
                .entry(dependency.id())
                .or_insert_with(|| GlobalDependency {
                    merged: Dependency::new(dependency.id()),
                    dependents: Vec::new(),
                });
            entry.merged.merge_bounds(dependency);
            entry.dependents.push((gem.specifier(), dependency.clone()));
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectGemSpecifier;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const X: &str = "11111111111111111111111111111111";
    const Y: &str = "22222222222222222222222222222222";
    const Z: &str = "33333333333333333333333333333333";

    fn gem(id: &str, name: &str, version: &str, extra: serde_json::Value) -> GemDescription {
        let mut doc = json!({
            "GemFormatVersion": 4,
            "Uuid": id,
            "Name": name,
            "Version": version
        });
        for (k, v) in extra.as_object().unwrap() {
            doc[k] = v.clone();
        }
        GemDescription::from_json(&doc, Path::new(name), &Path::new("/gems").join(name)).unwrap()
    }

    fn depends_on(id: &str, constraints: &[&str]) -> serde_json::Value {
        json!({ "Dependencies": [{ "Uuid": id, "VersionConstraints": constraints }] })
    }

    fn project() -> (TempDir, ProjectSettings) {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("Game");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("project.json"), r#"{ "project_name": "Game" }"#).unwrap();
        fs::write(dir.join("gems.json"), r#"{ "GemListFormatVersion": 2, "Gems": [] }"#).unwrap();
        let settings = ProjectSettings::initialize(temp.path(), "Game").unwrap();
        (temp, settings)
    }

    fn enable(settings: &mut ProjectSettings, gem: &GemDescription) {
        settings.enable_gem(ProjectGemSpecifier::new(gem.id(), gem.version(), gem.path()));
    }

    fn id(text: &str) -> GemId {
        GemId::parse(text).unwrap()
    }

    #[test]
    fn satisfied_dependencies_pass() {
        let a = gem(X, "A", "1.0.0", json!({}));
        let b = gem(Y, "B", "1.0.0", depends_on(X, &[">=1.0.0"]));
        let mut registry = GemRegistry::new();
        registry.add_description(a.clone());
        registry.add_description(b.clone());

        let (_temp, mut settings) = project();
        enable(&mut settings, &a);
        enable(&mut settings, &b);

        let report = DependencyValidator::new(&settings, &registry).validate();
        assert!(report.is_valid(), "{}", report.legacy_message());
    }

    #[test]
    fn missing_dependency_fails() {
        let a = gem(X, "A", "1.0.0", json!({}));
        let b = gem(Y, "B", "1.0.0", depends_on(X, &[">=1.0.0"]));
        let mut registry = GemRegistry::new();
        registry.add_description(a);
        registry.add_description(b.clone());

        let (_temp, mut settings) = project();
        enable(&mut settings, &b);

        let report = DependencyValidator::new(&settings, &registry).validate();
        assert!(!report.is_valid());
        let error = &report.errors()[0];
        assert_eq!(error.kind, ValidationErrorKind::MissingDependency);
        assert_eq!(error.dependent_id, id(Y));
        assert_eq!(error.target_id, id(X));
        assert!(error.detail.contains("\"B\""));
        assert!(error.detail.contains("\"A\""));
        assert!(error.detail.contains("not enabled"));
    }

    #[test]
    fn missing_dependency_named_from_name_roots() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("Gems/Hidden");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("gem.json"),
            format!(
                r#"{{ "GemFormatVersion": 4, "Uuid": "{}", "Name": "Hidden", "Version": "1.0.0" }}"#,
                X
            ),
        )
        .unwrap();

        let b = gem(Y, "B", "1.0.0", depends_on(X, &[">=1.0.0"]));
        let mut registry = GemRegistry::new();
        registry.add_description(b.clone());
        let (_project, mut settings) = project();
        enable(&mut settings, &b);

        let unnamed = DependencyValidator::new(&settings, &registry).validate();
        assert!(unnamed.errors()[0].detail.contains(&format!("gem {}", X)));

        let named = DependencyValidator::new(&settings, &registry)
            .name_root(SearchPath::new(temp.path()))
            .validate();
        assert!(named.errors()[0].detail.contains("\"Hidden\""));
    }

    #[test]
    fn wrong_version_fails_with_bounds_and_version() {
        let old_a = gem(X, "A", "0.5.0", json!({}));
        let b = gem(Y, "B", "1.0.0", depends_on(X, &[">=1.0.0"]));
        let mut registry = GemRegistry::new();
        registry.add_description(old_a.clone());
        registry.add_description(b.clone());

        let (_temp, mut settings) = project();
        enable(&mut settings, &old_a);
        enable(&mut settings, &b);

        let report = DependencyValidator::new(&settings, &registry).validate();
        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.kind, ValidationErrorKind::VersionMismatch);
        insta::assert_snapshot!(
            error.detail,
            @r#"Gem "B" (1.0.0) depends on gem "A" with version constraints >=1.0.0, but version 0.5.0 is enabled."#
        );
    }

    #[test]
    fn bounds_accumulate_across_dependents() {
        let a = gem(X, "A", "1.5.0", json!({}));
        let b = gem(Y, "B", "1.0.0", depends_on(X, &[">=1.0.0"]));
        let c = gem(Z, "C", "1.0.0", depends_on(X, &["<1.5.0"]));
        let mut registry = GemRegistry::new();
        for g in [&a, &b, &c] {
            registry.add_description((*g).clone());
        }

        let (_temp, mut settings) = project();
        for g in [&a, &b, &c] {
            enable(&mut settings, g);
        }

        let report = DependencyValidator::new(&settings, &registry).validate();
        assert_eq!(report.errors().len(), 1);
        let error = &report.errors()[0];
        assert_eq!(error.dependent_id, id(Z));
        assert!(error.detail.contains(">=1.0.0, <1.5.0"));
    }

    #[test]
    fn engine_mismatch_fails_unless_skipped() {
        let a = gem(X, "A", "1.0.0", json!({ "LumberyardVersion": [">=1.10.0"] }));
        let mut registry = GemRegistry::new();
        registry.add_description(a.clone());
        let (_temp, mut settings) = project();
        enable(&mut settings, &a);

        let skipped = DependencyValidator::new(&settings, &registry).validate();
        assert!(skipped.is_valid());

        let ok = DependencyValidator::new(&settings, &registry)
            .engine_version(Version::new(1, 12, 0))
            .validate();
        assert!(ok.is_valid());

        let failed = DependencyValidator::new(&settings, &registry)
            .engine_version(Version::new(1, 9, 0))
            .validate();
        assert!(!failed.is_valid());
        let error = &failed.errors()[0];
        assert_eq!(error.kind, ValidationErrorKind::EngineVersionMismatch);
        assert!(error.target_id.is_nil());
        assert!(error.detail.contains("1.9.0"));
    }

    #[test]
    fn unknown_enabled_gem_fails() {
        let registry = GemRegistry::new();
        let (_temp, mut settings) = project();
        settings.enable_gem(ProjectGemSpecifier::new(id(X), Version::new(1, 0, 0), "Gems/A"));

        let report = DependencyValidator::new(&settings, &registry).validate();
        assert_eq!(report.errors()[0].kind, ValidationErrorKind::UnknownGem);
    }

    #[test]
    fn unsatisfiable_bounds_warn() {
        let a = gem(X, "A", "1.5.0", json!({}));
        let b = gem(Y, "B", "1.0.0", depends_on(X, &["<1.0.0", ">2.0.0"]));
        let mut registry = GemRegistry::new();
        registry.add_description(a.clone());
        registry.add_description(b.clone());
        let (_temp, mut settings) = project();
        enable(&mut settings, &a);
        enable(&mut settings, &b);

        let report = DependencyValidator::new(&settings, &registry).validate();
        assert!(!report.is_valid());
        assert_eq!(report.warnings().len(), 1);
        assert!(report.warnings()[0].contains("<1.0.0, >2.0.0"));
    }
}
