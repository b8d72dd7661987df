//! Semantic versions and version constraints.
//!
//! - [`Version`] is a `major.minor.patch` triple with a total order
//! - [`Bound`] pairs a [`Comparison`] operator with a version
//! - [`Dependency`] is a target gem id plus bounds that must all hold
//!
//! # Example
//!
//! ```
//! use gemreg::version::{Bound, Version};
//!
//! let bound: Bound = "~>1.0".parse().unwrap();
//! assert!(bound.is_satisfied_by(Version::new(1, 9, 9)));
//! assert!(!bound.is_satisfied_by(Version::new(2, 0, 0)));
//! ```

pub mod bound;
pub mod dependency;

pub use bound::{Bound, Comparison};
pub use dependency::{Dependency, Specifier};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GemError, Result};

/// A three-part semantic version.
///
/// Ordering is lexicographic over `(major, minor, patch)`. The zero version
/// `0.0.0` doubles as the "unset" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// The unset sentinel.
    pub const ZERO: Version = Version::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse exactly `"<uint>.<uint>.<uint>"`.
    pub fn parse(text: &str) -> Result<Self> {
        let parts = parse_components(text)?;
        if parts.len() != 3 {
            return Err(GemError::InvalidVersion {
                text: text.to_string(),
                reason: format!("expected 3 components, found {}", parts.len()),
            });
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Whether this is the unset sentinel.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Component by position (0 = major).
    pub(crate) fn component(&self, index: usize) -> u64 {
        match index {
            0 => self.major,
            1 => self.minor,
            _ => self.patch,
        }
    }
}

/// Split a dotted version into numeric components.
///
/// Accepts one or more components; callers enforce the count they need.
pub(crate) fn parse_components(text: &str) -> Result<Vec<u64>> {
    let invalid = |reason: String| GemError::InvalidVersion {
        text: text.to_string(),
        reason,
    };

    if text.is_empty() {
        return Err(invalid("empty string".to_string()));
    }

    text.split('.')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid(format!("'{}' is not a number", part)));
            }
            if part.len() > 1 && part.starts_with('0') {
                return Err(invalid(format!("'{}' has a leading zero", part)));
            }
            part.parse::<u64>()
                .map_err(|e| invalid(format!("'{}': {}", part, e)))
        })
        .collect()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = GemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Version::parse(&text).map_err(serde::de::Error::custom)
    }
}
