//! Core domain logic for sourcelevel
//!
//! This module contains the evaluation engine with no direct I/O.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Level, Control, BranchPolicy, VerifiedLevels)
//! - `services/` - Eligibility, matching, aggregation, resolution
//! - `ports/` - Trait definitions for policy sources and attestation extraction
//! - `context` - Cancellation and deadlines
//! - `error` - Error taxonomy

pub mod context;
pub mod error;
pub mod models;
pub mod ports;
pub mod services;

pub use context::Context;
pub use error::{Check, EvaluationError, ExtractError};
