//! Controls - time-stamped security properties of a branch
//!
//! A control becomes true at `since` and is assumed to hold from then on.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::timestamp;

/// Name of a control
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlName {
    /// Force pushes and branch deletion are blocked
    ContinuityEnforced,
    /// Source provenance is generated for each push
    ProvenanceAvailable,
    /// Changes require review before merge
    ReviewEnforced,
    /// Tags cannot be moved or deleted
    ImmutableTags,
    /// A control this engine does not evaluate
    Other(String),
}

impl ControlName {
    /// The wire identifier of the control
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::ContinuityEnforced => "CONTINUITY_ENFORCED",
            Self::ProvenanceAvailable => "PROVENANCE_AVAILABLE",
            Self::ReviewEnforced => "REVIEW_ENFORCED",
            Self::ImmutableTags => "IMMUTABLE_TAGS",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for ControlName {
    fn from(s: &str) -> Self {
        match s {
            "CONTINUITY_ENFORCED" => Self::ContinuityEnforced,
            "PROVENANCE_AVAILABLE" => Self::ProvenanceAvailable,
            "REVIEW_ENFORCED" => Self::ReviewEnforced,
            "IMMUTABLE_TAGS" => Self::ImmutableTags,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ControlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ControlName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ControlName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// A control and the instant it was enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Which control
    pub name: ControlName,

    /// When the control was enabled; omitted on the wire when unknown
    #[serde(
        default = "timestamp::zero_time",
        with = "timestamp",
        skip_serializing_if = "timestamp::is_zero"
    )]
    pub since: DateTime<Utc>,
}

impl Control {
    /// Create a control enabled at `since`
    #[must_use]
    pub const fn new(name: ControlName, since: DateTime<Utc>) -> Self {
        Self { name, since }
    }
}

/// An unordered collection of controls, looked up by name
///
/// Names are not deduplicated; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlSet(Vec<Control>);

impl ControlSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a control without checking for duplicates
    pub fn add(&mut self, control: Control) {
        self.0.push(control);
    }

    /// Builder-style [`add`](Self::add)
    #[must_use]
    pub fn with(mut self, name: ControlName, since: DateTime<Utc>) -> Self {
        self.add(Control::new(name, since));
        self
    }

    /// First control with the given name
    #[must_use]
    pub fn get(&self, name: &ControlName) -> Option<&Control> {
        self.0.iter().find(|c| &c.name == name)
    }

    /// Activation instant of the first control with the given name
    #[must_use]
    pub fn since(&self, name: &ControlName) -> Option<DateTime<Utc>> {
        self.get(name).map(|c| c.since)
    }

    /// Iterate over the controls in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Control> {
        self.0.iter()
    }

    /// Number of controls
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Control>> for ControlSet {
    fn from(controls: Vec<Control>) -> Self {
        Self(controls)
    }
}

impl FromIterator<Control> for ControlSet {
    fn from_iter<I: IntoIterator<Item = Control>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ControlSet {
    type Item = &'a Control;
    type IntoIter = std::slice::Iter<'a, Control>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Control status of a single commit, as reported by the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlStatus {
    /// When the commit was pushed to the branch
    #[serde(with = "timestamp")]
    pub commit_push_time: DateTime<Utc>,

    /// Controls active on the branch
    #[serde(default)]
    pub controls: ControlSet,
}
