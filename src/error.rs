//! Error types for gem registry operations.
//!
//! This module defines [`GemError`], the error type returned by every
//! fallible operation in the crate, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Malformed input (bad JSON, bad versions, bad ids) gets a dedicated
//!   variant naming the offending value or file
//! - Lookups that can legitimately miss return `Option`, not an error
//! - Dependency validation failures are reported as data by
//!   [`crate::validate`], never as a `GemError`
//! - `anyhow::Error` (via `GemError::Other`) is reserved for the CLI layer

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for gem registry operations.
#[derive(Debug, Error)]
pub enum GemError {
    /// A version string is not of the form `major.minor.patch`.
    #[error("Invalid version '{text}': {reason}")]
    InvalidVersion { text: String, reason: String },

    /// A version constraint such as `>=1.0.0` could not be parsed.
    #[error("Invalid version constraint '{constraint}': {reason}")]
    InvalidConstraint { constraint: String, reason: String },

    /// A gem identifier is not a 128-bit hex value.
    #[error("Invalid gem id '{text}'")]
    InvalidId { text: String },

    /// A gem description file could not be parsed.
    #[error("Failed to parse gem description at {path}: {message}")]
    DescriptionParse { path: PathBuf, message: String },

    /// A gem description declares a format version this build cannot read.
    #[error(
        "Unsupported gem format version {found} in {path} (expected {min} through {max})"
    )]
    UnsupportedFormat {
        path: PathBuf,
        found: i64,
        min: i64,
        max: i64,
    },

    /// No gem description file exists for a referenced gem.
    #[error("Gem description not found: {path}")]
    DescriptionNotFound { path: PathBuf },

    /// A project gems ledger or project descriptor does not exist.
    #[error("Project file not found: {path}")]
    ProjectFileNotFound { path: PathBuf },

    /// A project gems ledger or project descriptor could not be parsed.
    #[error("Failed to parse project file at {path}: {message}")]
    LedgerParse { path: PathBuf, message: String },

    /// One or more gem descriptions failed during a directory scan.
    #[error("Failed to load some gems:\n{message}")]
    ScanFailed { message: String },

    /// Tool configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the tool configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for gem registry operations.
pub type Result<T> = std::result::Result<T, GemError>;
