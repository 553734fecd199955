//! A package's own requirements manifest (`Cartfile`).
//!
//! ```text
//! github "Alamofire/Alamofire" ~> 4.1
//! github "antitypical/Result" == 3.2.4
//! github "ReactiveX/RxSwift" >= 4.0
//! git "https://example.com/team/Storage.git" "develop"
//! github "yapstudios/YapDatabase"
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

use crate::dependency::{split_dependency, strip_comment, take_quoted, Dependency};
use crate::version::{SemanticVersion, VersionSpecifier};

/// A malformed `Cartfile`. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CartfileError {
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: invalid version specifier `{specifier}`")]
    #[diagnostic(help("use `~> x.y`, `== x.y.z`, `>= x.y.z` or a quoted git reference"))]
    InvalidSpecifier { line: usize, specifier: String },

    #[error("line {line}: {dependency} is already required on line {first_line}")]
    Duplicate {
        line: usize,
        first_line: usize,
        dependency: String,
    },
}

/// The requirements one package declares on other packages, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cartfile {
    requirements: Vec<(Dependency, VersionSpecifier)>,
}

impl Cartfile {
    pub fn requirements(&self) -> &[(Dependency, VersionSpecifier)] {
        &self.requirements
    }

    pub fn into_requirements(self) -> Vec<(Dependency, VersionSpecifier)> {
        self.requirements
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl FromStr for Cartfile {
    type Err = CartfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut requirements = Vec::new();
        let mut seen: HashMap<Dependency, usize> = HashMap::new();

        for (idx, raw_line) in s.lines().enumerate() {
            let line = idx + 1;
            let text = strip_comment(raw_line).trim();
            if text.is_empty() {
                continue;
            }

            let (dependency, rest) =
                split_dependency(text).map_err(|e| CartfileError::Malformed {
                    line,
                    message: e.describe().to_string(),
                })?;
            let specifier = parse_specifier(rest).ok_or_else(|| CartfileError::InvalidSpecifier {
                line,
                specifier: rest.to_string(),
            })?;

            if let Some(&first_line) = seen.get(&dependency) {
                return Err(CartfileError::Duplicate {
                    line,
                    first_line,
                    dependency: dependency.to_string(),
                });
            }
            seen.insert(dependency.clone(), line);
            requirements.push((dependency, specifier));
        }

        Ok(Self { requirements })
    }
}

fn parse_specifier(text: &str) -> Option<VersionSpecifier> {
    if text.is_empty() {
        return Some(VersionSpecifier::Any);
    }
    match take_quoted(text) {
        Ok(None) => {}
        Ok(Some((reference, rest))) if !reference.is_empty() && rest.trim().is_empty() => {
            return Some(VersionSpecifier::GitReference(reference.to_string()));
        }
        _ => return None,
    }

    let operator = text.get(..2)?;
    let version = SemanticVersion::parse_lenient(text[2..].trim())?;
    match operator {
        "~>" => Some(VersionSpecifier::CompatibleWith(version)),
        "==" => Some(VersionSpecifier::Exactly(version)),
        ">=" => Some(VersionSpecifier::AtLeast(version)),
        _ => None,
    }
}
