//! Source provenance extraction
//!
//! Decodes the controls recorded in a source provenance predicate.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::core::error::ExtractError;
use crate::core::models::{
    ControlSet, SOURCE_PROVENANCE_PREDICATE_TYPE, SourceProvenance, Statement,
};
use crate::core::ports::ControlExtractor;

/// Extracts controls from source provenance statements
#[derive(Debug, Clone, Copy, Default)]
pub struct ProvenanceExtractor;

impl ProvenanceExtractor {
    /// Decode the full provenance predicate of `statement`
    pub fn provenance(statement: Option<&Statement>) -> Result<SourceProvenance, ExtractError> {
        let statement = statement.ok_or(ExtractError::NilStatement)?;

        if statement.predicate_type != SOURCE_PROVENANCE_PREDICATE_TYPE {
            return Err(ExtractError::UnsupportedPredicateType(
                statement.predicate_type.clone(),
            ));
        }

        let predicate = match &statement.predicate {
            None | Some(serde_json::Value::Null) => return Err(ExtractError::NilPredicate),
            Some(predicate) => predicate,
        };

        SourceProvenance::deserialize(predicate).map_err(|e| ExtractError::Predicate(e.to_string()))
    }
}

impl ControlExtractor for ProvenanceExtractor {
    fn extract(&self, statement: Option<&Statement>) -> Result<ControlSet, ExtractError> {
        Self::provenance(statement).map(|p| p.controls)
    }
}

/// Read an in-toto statement from a JSON file
pub fn read_statement(path: &Path) -> anyhow::Result<Statement> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
