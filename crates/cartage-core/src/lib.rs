//! Core data types for the cartage tool.
//!
//! This crate defines the values the compatibility checker works on:
//! dependency identities, semantic and pinned versions, version specifiers,
//! the `Cartfile` and `Cartfile.resolved` text formats, and the global
//! configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of the resolved manifest at the project root.
pub const RESOLVED_CARTFILE_NAME: &str = "Cartfile.resolved";

/// File name of a package's own requirements manifest.
pub const CARTFILE_NAME: &str = "Cartfile";

pub mod cartfile;
pub mod config;
pub mod dependency;
pub mod resolved;
pub mod version;
