//! Compatibility validation engine: re-derives who requires each pinned
//! dependency, and at what constraint, then checks every pin against every
//! incoming constraint.

pub mod error;
pub mod fetch;
pub mod graph;
pub mod invert;
pub mod validate;
