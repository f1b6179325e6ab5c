//! Control extraction port
//!
//! Recovers the control set embedded in a provenance attestation.

use crate::core::error::ExtractError;
use crate::core::models::{ControlSet, Statement};

/// Extracts controls from an attestation statement
///
/// Implementations must fail distinctly for a missing statement, an
/// unsupported predicate type and a missing predicate.
pub trait ControlExtractor: Send + Sync {
    /// Extract the controls carried by `statement`
    fn extract(&self, statement: Option<&Statement>) -> Result<ControlSet, ExtractError>;
}
