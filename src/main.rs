//! sourcelevel - SLSA Source level evaluation for protected branches
//!
//! Evaluates branch controls and provenance attestations against the
//! branch policies kept in a policy repository, and drafts new policies.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

/// Main entry point for the sourcelevel CLI
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
