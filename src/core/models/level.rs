//! SLSA Source levels
//!
//! Levels form a closed, totally ordered set. Unknown identifiers are
//! rejected when parsed instead of being compared lexically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::EvaluationError;

/// A SLSA Source level, ordered `Level1 < Level2 < Level3`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// No prerequisite controls
    #[default]
    Level1,
    /// History continuity is enforced
    Level2,
    /// Continuity is enforced and provenance is generated
    Level3,
}

impl Level {
    /// All levels, lowest first
    pub const ALL: [Self; 3] = [Self::Level1, Self::Level2, Self::Level3];

    /// The wire identifier of the level
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Level1 => "SLSA_SOURCE_LEVEL_1",
            Self::Level2 => "SLSA_SOURCE_LEVEL_2",
            Self::Level3 => "SLSA_SOURCE_LEVEL_3",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = EvaluationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| EvaluationError::UnknownLevel(s.to_string()))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
