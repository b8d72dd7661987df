//! Single version constraints.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use super::{parse_components, Version};
use crate::error::{GemError, Result};

/// `<op><version>` with optional whitespace around both parts.
static BOUND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(~>|>=|<=|==|>|<)\s*([^\s]+)\s*$").expect("BOUND_REGEX must compile")
});

/// Comparison operator of a [`Bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    /// `~>`: at least the given version, below the next significant boundary.
    Twiddle,
}

impl Comparison {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::LessEqual => "<=",
            Comparison::Equal => "==",
            Comparison::GreaterEqual => ">=",
            Comparison::Greater => ">",
            Comparison::Twiddle => "~>",
        }
    }

    fn from_operator(op: &str) -> Option<Self> {
        match op {
            "<" => Some(Comparison::Less),
            "<=" => Some(Comparison::LessEqual),
            "==" => Some(Comparison::Equal),
            ">=" => Some(Comparison::GreaterEqual),
            ">" => Some(Comparison::Greater),
            "~>" => Some(Comparison::Twiddle),
            _ => None,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One version constraint: an operator plus a version.
///
/// The number of components written in the source text is kept, since it
/// decides the upper limit of a `~>` bound and how the bound is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bound {
    comparison: Comparison,
    version: Version,
    parts: u8,
}

impl Bound {
    /// Create a bound over a fully specified version.
    pub fn new(comparison: Comparison, version: Version) -> Self {
        Self {
            comparison,
            version,
            parts: 3,
        }
    }

    /// Parse `"<op><version>"`, where the version has one to three components.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = |reason: String| GemError::InvalidConstraint {
            constraint: text.to_string(),
            reason,
        };

        let captures = BOUND_REGEX.captures(text).ok_or_else(|| {
            invalid("expected one of <, <=, ==, >=, >, ~> followed by a version".to_string())
        })?;

        let comparison = Comparison::from_operator(&captures[1])
            .ok_or_else(|| invalid(format!("unknown operator '{}'", &captures[1])))?;

        let components = parse_components(&captures[2]).map_err(|e| invalid(e.to_string()))?;
        if components.len() > 3 {
            return Err(invalid(format!(
                "version has {} components, at most 3 allowed",
                components.len()
            )));
        }

        let mut padded = [0u64; 3];
        padded[..components.len()].copy_from_slice(&components);

        Ok(Self {
            comparison,
            version: Version::new(padded[0], padded[1], padded[2]),
            parts: components.len() as u8,
        })
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Exclusive upper limit of a `~>` bound.
    ///
    /// The component just above the least significant written one is bumped
    /// and everything below it reset, so `~>1.2` stops at `2.0.0` and
    /// `~>1.2.3` at `1.3.0`. A single written component acts like two.
    pub fn twiddle_upper(&self) -> Version {
        let bump = usize::from(self.parts.max(2)) - 2;
        let mut next = [0u64; 3];
        for (i, slot) in next.iter_mut().enumerate().take(bump) {
            *slot = self.version.component(i);
        }
        next[bump] = self.version.component(bump).saturating_add(1);
        Version::new(next[0], next[1], next[2])
    }

    /// Evaluate this bound against a candidate version.
    pub fn is_satisfied_by(&self, candidate: Version) -> bool {
        match self.comparison {
            Comparison::Less => candidate < self.version,
            Comparison::LessEqual => candidate <= self.version,
            Comparison::Equal => candidate == self.version,
            Comparison::GreaterEqual => candidate >= self.version,
            Comparison::Greater => candidate > self.version,
            Comparison::Twiddle => candidate >= self.version && candidate < self.twiddle_upper(),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparison, self.version.major)?;
        if self.parts >= 2 {
            write!(f, ".{}", self.version.minor)?;
        }
        if self.parts >= 3 {
            write!(f, ".{}", self.version.patch)?;
        }
        Ok(())
    }
}

impl FromStr for Bound {
    type Err = GemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(major: u64, minor: u64, patch: u64) -> Version {
        Version::new(major, minor, patch)
    }

    #[test]
    fn parses_every_operator() {
        let cases = [
            ("<1.0.0", Comparison::Less),
            ("<=1.0.0", Comparison::LessEqual),
            ("==1.0.0", Comparison::Equal),
            (">=1.0.0", Comparison::GreaterEqual),
            (">1.0.0", Comparison::Greater),
            ("~>1.0.0", Comparison::Twiddle),
        ];
        for (text, expected) in cases {
            let bound = Bound::parse(text).unwrap();
            assert_eq!(bound.comparison(), expected, "{}", text);
            assert_eq!(bound.version(), v(1, 0, 0));
        }
    }

    #[test]
    fn parse_tolerates_whitespace() {
        let bound = Bound::parse(" >= 2.1.0 ").unwrap();
        assert_eq!(bound.comparison(), Comparison::GreaterEqual);
        assert_eq!(bound.version(), v(2, 1, 0));
    }

    #[test]
    fn parse_rejects_malformed() {
        for text in ["", "1.0.0", "=>1.0.0", "=1.0.0", ">=", ">=1.0.0.0", ">=1.x", "~>", "!1.0"] {
            assert!(Bound::parse(text).is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn twiddle_two_components_bounds_major() {
        let bound = Bound::parse("~>1.0").unwrap();
        assert!(bound.is_satisfied_by(v(1, 0, 0)));
        assert!(bound.is_satisfied_by(v(1, 0, 5)));
        assert!(bound.is_satisfied_by(v(1, 9, 9)));
        assert!(!bound.is_satisfied_by(v(2, 0, 0)));
        assert!(!bound.is_satisfied_by(v(0, 9, 9)));
    }

    #[test]
    fn twiddle_three_components_bounds_minor() {
        let bound = Bound::parse("~>1.0.0").unwrap();
        assert!(bound.is_satisfied_by(v(1, 0, 0)));
        assert!(bound.is_satisfied_by(v(1, 0, 9)));
        assert!(!bound.is_satisfied_by(v(1, 1, 0)));
    }

    #[test]
    fn twiddle_single_component_acts_like_two() {
        let bound = Bound::parse("~>2").unwrap();
        assert_eq!(bound.twiddle_upper(), v(3, 0, 0));
        assert!(bound.is_satisfied_by(v(2, 7, 1)));
        assert!(!bound.is_satisfied_by(v(3, 0, 0)));
    }

    #[test]
    fn twiddle_upper_keeps_higher_components() {
        assert_eq!(Bound::parse("~>1.2.3").unwrap().twiddle_upper(), v(1, 3, 0));
        assert_eq!(Bound::parse("~>1.2").unwrap().twiddle_upper(), v(2, 0, 0));
    }

    #[test]
    fn plain_operators_compare() {
        let target = v(1, 5, 0);
        assert!(Bound::parse("<2.0.0").unwrap().is_satisfied_by(target));
        assert!(!Bound::parse("<1.5.0").unwrap().is_satisfied_by(target));
        assert!(Bound::parse("<=1.5.0").unwrap().is_satisfied_by(target));
        assert!(Bound::parse("==1.5.0").unwrap().is_satisfied_by(target));
        assert!(!Bound::parse("==1.5.1").unwrap().is_satisfied_by(target));
        assert!(Bound::parse(">=1.5.0").unwrap().is_satisfied_by(target));
        assert!(!Bound::parse(">1.5.0").unwrap().is_satisfied_by(target));
    }

    #[test]
    fn display_uses_written_components() {
        assert_eq!(Bound::parse("~>1.0").unwrap().to_string(), "~>1.0");
        assert_eq!(Bound::parse(">= 1.0.0").unwrap().to_string(), ">=1.0.0");
        assert_eq!(Bound::new(Comparison::Less, v(2, 0, 0)).to_string(), "<2.0.0");
    }
}
