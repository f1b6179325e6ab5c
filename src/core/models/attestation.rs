//! In-toto statements carrying source provenance
//!
//! Only the fields needed to recover controls are modelled. Signature
//! handling lives outside this crate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ControlSet, timestamp};

/// In-toto statement type URI
pub const STATEMENT_TYPE: &str = "https://in-toto.io/Statement/v1";

/// Predicate type of source provenance attestations
pub const SOURCE_PROVENANCE_PREDICATE_TYPE: &str =
    "https://github.com/slsa-framework/slsa-source-poc/source-provenance/v1-draft";

/// An in-toto statement with an opaque predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Statement type URI
    #[serde(rename = "_type", default)]
    pub statement_type: String,

    /// Subjects of the statement
    #[serde(default)]
    pub subject: Vec<ResourceDescriptor>,

    /// Predicate type URI
    #[serde(rename = "predicateType", default)]
    pub predicate_type: String,

    /// Predicate body, decoded according to `predicate_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<serde_json::Value>,
}

impl Statement {
    /// Build a statement around a source provenance predicate
    pub fn for_provenance(
        subject: Vec<ResourceDescriptor>,
        predicate: &SourceProvenance,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            statement_type: STATEMENT_TYPE.to_string(),
            subject,
            predicate_type: SOURCE_PROVENANCE_PREDICATE_TYPE.to_string(),
            predicate: Some(serde_json::to_value(predicate)?),
        })
    }
}

/// A statement subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Subject name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Digests keyed by algorithm (`gitCommit`, `sha256`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub digest: BTreeMap<String, String>,
}

/// Source provenance predicate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceProvenance {
    /// Commit preceding the one attested
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prev_commit: String,

    /// Repository URI
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo_uri: String,

    /// Kind of push that produced the commit
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub activity_type: String,

    /// Who pushed
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub actor: String,

    /// Branch the commit landed on
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch: String,

    /// When the provenance was created
    #[serde(
        default = "timestamp::zero_time",
        with = "timestamp",
        skip_serializing_if = "timestamp::is_zero"
    )]
    pub created_on: DateTime<Utc>,

    /// Controls in force when the commit was pushed
    #[serde(default)]
    pub controls: ControlSet,
}
