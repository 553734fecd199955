//! Shared utilities for the cartage tool.
//!
//! Cross-cutting concerns used by the ops and CLI crates: the workspace
//! error type, filesystem helpers and Cargo-style terminal status output.

pub mod errors;
pub mod fs;
pub mod progress;
