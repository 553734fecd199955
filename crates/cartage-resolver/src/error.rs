//! Error kinds of the validation engine.

use std::path::PathBuf;

use cartage_core::cartfile::CartfileError;
use cartage_core::dependency::Dependency;
use cartage_core::version::VersionSpecifier;
use miette::Diagnostic;
use thiserror::Error;

use crate::invert::InversionConflict;
use crate::validate::ValidationError;

/// A fetch collaborator could not produce a dependency's own requirements.
#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: CartfileError,
    },

    #[error("{0}")]
    Other(String),
}

/// Failures of the validation engine other than the business-level
/// [`ValidationError`] outcome, which is carried as [`CoreError::Incompatible`].
#[derive(Debug, Error, Diagnostic)]
pub enum CoreError {
    #[error("could not load the requirements of {dependency}: {source}")]
    #[diagnostic(help("check that the dependency is checked out and its Cartfile is readable"))]
    Fetch {
        dependency: Dependency,
        source: FetchError,
    },

    #[error("{parent} declares both {existing} and {conflicting} for {child}")]
    InversionConflict {
        parent: Dependency,
        child: Dependency,
        existing: VersionSpecifier,
        conflicting: VersionSpecifier,
    },

    #[error("requirement fetch task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Incompatible(#[from] ValidationError),
}

impl From<InversionConflict<Dependency, Dependency, VersionSpecifier>> for CoreError {
    fn from(conflict: InversionConflict<Dependency, Dependency, VersionSpecifier>) -> Self {
        Self::InversionConflict {
            parent: conflict.parent,
            child: conflict.child,
            existing: conflict.existing,
            conflicting: conflict.conflicting,
        }
    }
}
