//! Dependencies: a target gem plus the bounds its version must meet.

use std::fmt;

use super::{Bound, Comparison, Version};
use crate::error::Result;
use crate::gem::GemId;

/// A concrete gem at a concrete version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Specifier {
    pub id: GemId,
    pub version: Version,
}

impl Specifier {
    pub fn new(id: GemId, version: Version) -> Self {
        Self { id, version }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// A target gem id and a set of bounds that must all hold.
///
/// An empty bound list is met by any version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dependency {
    id: GemId,
    bounds: Vec<Bound>,
}

impl Dependency {
    pub fn new(id: GemId) -> Self {
        Self {
            id,
            bounds: Vec::new(),
        }
    }

    pub fn id(&self) -> GemId {
        self.id
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    pub fn push_bound(&mut self, bound: Bound) {
        self.bounds.push(bound);
    }

    /// Parse each constraint string and append its bound.
    ///
    /// Stops at the first malformed string. Nothing is appended unless every
    /// string parses.
    pub fn parse_versions<S: AsRef<str>>(&mut self, constraints: &[S]) -> Result<()> {
        let mut parsed = Vec::with_capacity(constraints.len());
        for constraint in constraints {
            parsed.push(Bound::parse(constraint.as_ref())?);
        }
        self.bounds.extend(parsed);
        Ok(())
    }

    /// Add every bound of `other` to this dependency.
    pub fn merge_bounds(&mut self, other: &Dependency) {
        self.bounds.extend(other.bounds.iter().copied());
    }

    /// Whether `version` meets every bound, ignoring the target id.
    pub fn is_met_by(&self, version: Version) -> bool {
        self.bounds.iter().all(|b| b.is_satisfied_by(version))
    }

    /// Whether `candidate` is the target gem at an acceptable version.
    pub fn is_fulfilled_by(&self, candidate: &Specifier) -> bool {
        candidate.id == self.id && self.is_met_by(candidate.version)
    }

    /// Whether any version at all could meet every bound.
    ///
    /// Each bound narrows a half-open interval `[low, high)`; the set is
    /// satisfiable when the interval stays non-empty and every `==` pin
    /// lies inside it.
    pub fn is_satisfiable(&self) -> bool {
        let mut low = Version::ZERO;
        let mut high: Option<Version> = None;
        let mut pins: Vec<Version> = Vec::new();

        let raise = |low: &mut Version, v: Version| {
            if v > *low {
                *low = v;
            }
        };
        let lower = |high: &mut Option<Version>, v: Version| {
            if high.is_none_or(|h| v < h) {
                *high = Some(v);
            }
        };

        for bound in &self.bounds {
            let v = bound.version();
            match bound.comparison() {
                Comparison::GreaterEqual => raise(&mut low, v),
                Comparison::Greater => match successor(v) {
                    Some(next) => raise(&mut low, next),
                    None => return false,
                },
                Comparison::Less => lower(&mut high, v),
                Comparison::LessEqual => {
                    if let Some(next) = successor(v) {
                        lower(&mut high, next);
                    }
                }
                Comparison::Equal => pins.push(v),
                Comparison::Twiddle => {
                    raise(&mut low, v);
                    lower(&mut high, bound.twiddle_upper());
                }
            }
        }

        let in_range = |v: Version| v >= low && high.is_none_or(|h| v < h);
        match pins.first() {
            Some(pin) => pins.iter().all(|p| p == pin) && in_range(*pin),
            None => high.is_none_or(|h| low < h),
        }
    }

    /// Bounds rendered as `">=1.0.0, <2.0.0"`.
    pub fn bounds_string(&self) -> String {
        self.bounds
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The next version in total order, if one exists.
fn successor(v: Version) -> Option<Version> {
    if let Some(patch) = v.patch.checked_add(1) {
        return Some(Version::new(v.major, v.minor, patch));
    }
    if let Some(minor) = v.minor.checked_add(1) {
        return Some(Version::new(v.major, minor, 0));
    }
    v.major.checked_add(1).map(|major| Version::new(major, 0, 0))
}
