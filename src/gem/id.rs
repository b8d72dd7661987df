//! Gem identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GemError, Result};

/// 128-bit gem identifier.
///
/// Written as 32 hex digits. Hyphens and a surrounding pair of braces are
/// tolerated on input. `Display` renders lowercase without separators, the
/// form used in module file names; [`GemId::braced`] renders the registry
/// form written to project ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GemId([u8; 16]);

impl GemId {
    /// The all-zero id, never valid for a real gem.
    pub const NIL: GemId = GemId([0; 16]);

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Parse an id, allowing the nil value.
    pub fn parse(text: &str) -> Result<Self> {
        let invalid = || GemError::InvalidId {
            text: text.to_string(),
        };

        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .unwrap_or(trimmed);
        let digits: String = inner.chars().filter(|c| *c != '-').collect();
        if digits.len() != 32 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 16];
        hex::decode_to_slice(&digits, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }

    /// Uppercase `{8-4-4-4-12}` form.
    pub fn braced(&self) -> String {
        let digits = hex::encode_upper(self.0);
        format!(
            "{{{}-{}-{}-{}-{}}}",
            &digits[0..8],
            &digits[8..12],
            &digits[12..16],
            &digits[16..20],
            &digits[20..32]
        )
    }

    /// Parse an id and reject the nil value.
    pub fn parse_non_nil(text: &str) -> Result<Self> {
        let id = Self::parse(text)?;
        if id.is_nil() {
            return Err(GemError::InvalidId {
                text: text.to_string(),
            });
        }
        Ok(id)
    }
}

impl fmt::Display for GemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for GemId {
    type Err = GemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for GemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        GemId::parse(&text).map_err(serde::de::Error::custom)
    }
}
