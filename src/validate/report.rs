//! Validation results.

use std::fmt;

use serde::Serialize;

use crate::gem::GemId;

/// What went wrong for one dependent gem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The target gem is not enabled at all.
    MissingDependency,
    /// The target gem is enabled at a version outside the bounds.
    VersionMismatch,
    /// The host engine version is outside the gem's engine bounds.
    EngineVersionMismatch,
    /// An enabled gem has no description in the registry.
    UnknownGem,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::MissingDependency => "missing-dependency",
            ValidationErrorKind::VersionMismatch => "version-mismatch",
            ValidationErrorKind::EngineVersionMismatch => "engine-version-mismatch",
            ValidationErrorKind::UnknownGem => "unknown-gem",
        }
    }
}

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The enabled gem whose requirement failed.
    pub dependent_id: GemId,
    /// The required gem; nil for engine checks.
    pub target_id: GemId,
    pub kind: ValidationErrorKind,
    /// Human-readable explanation
    pub detail: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Everything a validation pass found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
    warnings: Vec<String>,
}

impl ValidationReport {
    pub(crate) fn push_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub(crate) fn push_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Advisory notes that do not affect [`is_valid`](Self::is_valid).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// All error details as one newline-separated string.
    pub fn legacy_message(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.detail.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
