//! Error taxonomy for policy resolution and evaluation
//!
//! `PolicyNotMet` is the expected, user-facing way of reporting that a branch
//! does not comply. Everything else is an operational failure.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving a policy or evaluating controls against it
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvaluationError {
    /// The local policy file could not be read
    #[error("reading policy file {}: {message}", path.display())]
    PolicyUnreadable {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O message
        message: String,
    },

    /// The remote policy could not be fetched (transport or non-404 status)
    #[error("fetching policy: {0}")]
    PolicyFetchFailed(String),

    /// Policy content could not be decoded; carries the decoder message
    #[error("parsing policy: {0}")]
    PolicyMalformed(String),

    /// A level identifier outside the known set
    #[error("unknown level {0}")]
    UnknownLevel(String),

    /// Controls do not satisfy the declared policy
    #[error("{0}")]
    PolicyNotMet(String),

    /// Caller cancelled the evaluation or its deadline passed
    #[error("policy resolution cancelled: {0}")]
    Cancelled(String),

    /// Controls could not be extracted from an attestation
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A sub-check of the aggregation failed
    #[error("error computing {check}: {source}")]
    Check {
        /// Which dimension failed
        check: Check,
        /// The failure
        source: Box<EvaluationError>,
    },
}

impl EvaluationError {
    /// Wrap an error with the prefix of the sub-check that produced it
    #[must_use]
    pub fn in_check(self, check: Check) -> Self {
        Self::Check {
            check,
            source: Box::new(self),
        }
    }

    /// Whether the error reports non-compliance rather than a failure
    #[must_use]
    pub fn is_policy_not_met(&self) -> bool {
        match self {
            Self::PolicyNotMet(_) => true,
            Self::Check { source, .. } => source.is_policy_not_met(),
            _ => false,
        }
    }

    /// Whether the error came from cancellation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// The sub-checks of an evaluation, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Level matching
    SlsaLevel,
    /// Review enforcement
    ReviewEnforced,
    /// Tag immutability
    ImmutableTags,
}

impl Check {
    /// Stable description used in error prefixes
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SlsaLevel => "slsa level",
            Self::ReviewEnforced => "review enforced",
            Self::ImmutableTags => "tag immutability enforced",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the attestation extraction collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// No statement was supplied
    #[error("nil statement")]
    NilStatement,

    /// The statement carries a predicate type we do not understand
    #[error("unsupported predicate type: {0}")]
    UnsupportedPredicateType(String),

    /// The statement has a supported type but no predicate
    #[error("nil predicate in statement")]
    NilPredicate,

    /// The predicate body could not be decoded
    #[error("decoding predicate: {0}")]
    Predicate(String),
}
