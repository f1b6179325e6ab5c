//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core evaluation logic
//! and external systems (filesystem, hosting APIs, attestation formats).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations, so tests can substitute in-memory sources.

mod control_extractor;
mod policy_source;

pub use control_extractor::ControlExtractor;
pub use policy_source::{PolicyDocument, PolicySource};
