//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `github` - Policy repository read through the GitHub contents API
//! - `local` - Policy file on disk, and writing drafted policies
//! - `attestation` - Controls recovered from source provenance statements
//! - `selector` - Picks the local or remote source from configuration

pub mod attestation;
pub mod github;
pub mod local;
pub mod selector;

pub use attestation::{ProvenanceExtractor, read_statement};
pub use github::GitHubPolicyRepository;
pub use local::{LocalPolicyFile, write_policy};
pub use selector::PolicySelector;
