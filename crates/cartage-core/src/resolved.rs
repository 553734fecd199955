//! `Cartfile.resolved`: the flat list of pinned dependency versions.
//!
//! Format, one entry per line:
//!
//! ```text
//! github "Alamofire/Alamofire" "4.6.0"
//! git "https://example.com/team/Storage.git" "9f2c1e0"
//! ```
//!
//! Blank lines and `#` comments are ignored.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

use crate::dependency::{split_dependency, strip_comment, take_quoted, Dependency, LineError};
use crate::version::PinnedVersion;

/// A malformed `Cartfile.resolved`. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    #[diagnostic(help("expected `<kind> \"<source>\" \"<version>\"`"))]
    Malformed { line: usize, message: String },

    #[error("line {line}: missing quoted pinned version for {dependency}")]
    MissingVersion { line: usize, dependency: String },

    #[error("line {line}: unexpected trailing input `{content}`")]
    TrailingInput { line: usize, content: String },

    #[error("line {line}: {dependency} is already pinned on line {first_line}")]
    Duplicate {
        line: usize,
        first_line: usize,
        dependency: String,
    },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            Self::Malformed { line, .. }
            | Self::MissingVersion { line, .. }
            | Self::TrailingInput { line, .. }
            | Self::Duplicate { line, .. } => *line,
        }
    }
}

/// The resolved manifest: one pinned version per dependency, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCartfile {
    entries: Vec<(Dependency, PinnedVersion)>,
}

impl ResolvedCartfile {
    /// Load and parse a `Cartfile.resolved` from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            cartage_util::errors::CartageError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        let resolved: Self = content.parse().map_err(|e: ParseError| {
            miette::Report::new(e).wrap_err(format!("Failed to parse {}", path.display()))
        })?;
        tracing::debug!("Read {} pins from {}", resolved.len(), path.display());
        Ok(resolved)
    }

    /// Write the manifest to `path` in the text format.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        std::fs::write(path, self.to_string()).map_err(|e| {
            cartage_util::errors::CartageError::Manifest {
                message: format!("Failed to write {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn entries(&self) -> &[(Dependency, PinnedVersion)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Dependency, &PinnedVersion)> {
        self.entries.iter().map(|(d, v)| (d, v))
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.iter().map(|(d, _)| d)
    }

    /// The pinned version of `dependency`, if it is part of the manifest.
    pub fn version_of(&self, dependency: &Dependency) -> Option<&PinnedVersion> {
        self.entries
            .iter()
            .find(|(d, _)| d == dependency)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, dependency: &Dependency) -> bool {
        self.version_of(dependency).is_some()
    }

    /// Find an entry by its short name (`Alamofire`) or its manifest source
    /// (`Alamofire/Alamofire`).
    pub fn find(&self, key: &str) -> Option<(&Dependency, &PinnedVersion)> {
        self.iter()
            .find(|(d, _)| d.source() == key)
            .or_else(|| self.iter().find(|(d, _)| d.name() == key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for ResolvedCartfile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();
        let mut seen: HashMap<Dependency, usize> = HashMap::new();

        for (idx, raw_line) in s.lines().enumerate() {
            let line = idx + 1;
            let text = strip_comment(raw_line).trim();
            if text.is_empty() {
                continue;
            }

            let malformed = |e: LineError| ParseError::Malformed {
                line,
                message: e.describe().to_string(),
            };
            let (dependency, rest) = split_dependency(text).map_err(malformed)?;
            let (version, trailing) =
                take_quoted(rest)
                    .map_err(malformed)?
                    .ok_or_else(|| ParseError::MissingVersion {
                        line,
                        dependency: dependency.to_string(),
                    })?;
            if version.is_empty() {
                return Err(ParseError::MissingVersion {
                    line,
                    dependency: dependency.to_string(),
                });
            }
            let trailing = trailing.trim();
            if !trailing.is_empty() {
                return Err(ParseError::TrailingInput {
                    line,
                    content: trailing.to_string(),
                });
            }
            if let Some(&first_line) = seen.get(&dependency) {
                return Err(ParseError::Duplicate {
                    line,
                    first_line,
                    dependency: dependency.to_string(),
                });
            }

            seen.insert(dependency.clone(), line);
            entries.push((dependency, PinnedVersion::new(version)));
        }

        Ok(Self { entries })
    }
}

impl fmt::Display for ResolvedCartfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (dependency, version) in &self.entries {
            writeln!(f, "{dependency} \"{version}\"")?;
        }
        Ok(())
    }
}
