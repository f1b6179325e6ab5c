//! Verified levels - the result of an evaluation

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::Level;

/// Wire tag for the review property
pub const REVIEW_ENFORCED_TAG: &str = "REVIEW_ENFORCED";

/// Wire tag for the immutable tags property
pub const IMMUTABLE_TAGS_TAG: &str = "IMMUTABLE_TAGS";

/// A property verified alongside the level, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VerifiedProperty {
    /// Review was enforced for as long as the policy requires
    ReviewEnforced,
    /// Tags were immutable for as long as the policy requires
    ImmutableTags,
}

impl VerifiedProperty {
    /// The wire identifier of the property
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReviewEnforced => REVIEW_ENFORCED_TAG,
            Self::ImmutableTags => IMMUTABLE_TAGS_TAG,
        }
    }
}

impl fmt::Display for VerifiedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one level, then optionally review, then immutable tags
///
/// Serializes as a flat array of wire identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedLevels {
    level: Level,
    properties: BTreeSet<VerifiedProperty>,
}

impl VerifiedLevels {
    /// Start a result with its level
    #[must_use]
    pub const fn from_level(level: Level) -> Self {
        Self {
            level,
            properties: BTreeSet::new(),
        }
    }

    /// Record a verified property
    ///
    /// Properties keep their output order whatever order they are added in.
    pub fn push(&mut self, property: VerifiedProperty) {
        self.properties.insert(property);
    }

    /// The verified level
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The wire identifiers in order
    #[must_use]
    pub fn as_strings(&self) -> Vec<&'static str> {
        std::iter::once(self.level.as_str())
            .chain(self.properties.iter().map(|p| p.as_str()))
            .collect()
    }
}

impl fmt::Display for VerifiedLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_strings().join(", "))
    }
}

impl Serialize for VerifiedLevels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tags = self.as_strings();
        let mut seq = serializer.serialize_seq(Some(tags.len()))?;
        for tag in tags {
            seq.serialize_element(tag)?;
        }
        seq.end()
    }
}
