use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for cartage operations.
#[derive(Debug, Error, Diagnostic)]
pub enum CartageError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (`Cartfile` or `Cartfile.resolved`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Cartfile.resolved for syntax errors"))]
    Manifest { message: String },

    /// Global configuration could not be read or parsed.
    #[error("Config error: {message}")]
    Config { message: String },

    /// The pinned versions do not satisfy the declared requirements.
    #[error("{message}")]
    #[diagnostic(help("Update the offending pins and run `cartage validate` again"))]
    Validation { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type CartageResult<T> = miette::Result<T>;
