//! Adapter tests
//!
//! Tests for I/O adapter implementations:
//! - GitHub policy repository (against a local HTTP server)
//! - Local policy files

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;
