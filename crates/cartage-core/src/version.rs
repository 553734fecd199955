//! Semantic versions, pinned versions, and the constraints placed on them.
//!
//! Precedence here deliberately ignores pre-release and build metadata:
//! `1.2.3-beta` and `1.2.3` compare equal. Only the numeric triple decides
//! whether a pin satisfies a specifier.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A `MAJOR.MINOR.PATCH[-pre][+build]` version.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build: None,
        }
    }

    /// Strict parse. Anything that is not a full semantic version
    /// (`4.1`, `v4.1.0`, a commit hash, a branch name) yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let version = semver::Version::parse(text).ok()?;
        Some(Self::from(version))
    }

    /// Parse the shorthand accepted in requirement manifests.
    ///
    /// A leading `v` is dropped and missing minor/patch components are
    /// filled with zero, so `~> 4.1` reads as `~> 4.1.0`.
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let text = text.strip_prefix('v').unwrap_or(text);
        let split = text.find(['-', '+']).unwrap_or(text.len());
        let (core, suffix) = text.split_at(split);
        let padded = match core.matches('.').count() {
            0 => format!("{core}.0.0{suffix}"),
            1 => format!("{core}.0{suffix}"),
            _ => text.to_string(),
        };
        Self::parse(&padded)
    }

    fn triple(&self) -> (u64, u64, u64) {
        (self.major, self.minor, self.patch)
    }
}

impl From<semver::Version> for SemanticVersion {
    fn from(v: semver::Version) -> Self {
        let pre_release = (!v.pre.is_empty()).then(|| v.pre.to_string());
        let build = (!v.build.is_empty()).then(|| v.build.to_string());
        Self {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            pre_release,
            build,
        }
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.triple().hash(state);
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.triple().cmp(&other.triple())
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre_release {
            write!(f, "-{pre}")?;
        }
        if let Some(ref build) = self.build {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

/// The concrete version recorded for a dependency in `Cartfile.resolved`:
/// a semantic version, a tag, or an opaque reference such as a commit.
#[derive(Debug, Clone)]
pub struct PinnedVersion {
    raw: String,
    semantic: Option<SemanticVersion>,
}

impl PinnedVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let semantic = SemanticVersion::parse(&raw);
        Self { raw, semantic }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed version, if the raw text is a valid semantic version.
    pub fn semantic(&self) -> Option<&SemanticVersion> {
        self.semantic.as_ref()
    }
}

impl PartialEq for PinnedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PinnedVersion {}

impl Hash for PinnedVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for PinnedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A constraint one package declares on another package's version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionSpecifier {
    Any,
    Exactly(SemanticVersion),
    AtLeast(SemanticVersion),
    CompatibleWith(SemanticVersion),
    GitReference(String),
}

impl VersionSpecifier {
    /// Whether `pinned` meets this constraint.
    ///
    /// A pin that is not a semantic version cannot be judged against a
    /// semantic constraint and is treated as compatible with it. Git
    /// references always require an exact textual match.
    pub fn is_satisfied_by(&self, pinned: &PinnedVersion) -> bool {
        let version = pinned.semantic();
        match self {
            Self::Any => true,
            Self::GitReference(reference) => pinned.raw() == reference,
            Self::Exactly(required) => version.map_or(true, |v| v == required),
            Self::AtLeast(required) => version.map_or(true, |v| v >= required),
            Self::CompatibleWith(required) => version.map_or(true, |v| {
                v >= required && same_compatibility_band(v, required)
            }),
        }
    }
}

/// Caret-style bands: the breaking-change boundary is the first non-zero
/// component of `required`, and `0.0.x` requires an exact match.
fn same_compatibility_band(version: &SemanticVersion, required: &SemanticVersion) -> bool {
    if required.major > 0 {
        version.major == required.major
    } else if required.minor > 0 {
        version.major == required.major && version.minor == required.minor
    } else {
        version.triple() == required.triple()
    }
}

/// Free-function form of [`VersionSpecifier::is_satisfied_by`].
pub fn satisfies(specifier: &VersionSpecifier, pinned: &PinnedVersion) -> bool {
    specifier.is_satisfied_by(pinned)
}

impl fmt::Display for VersionSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Exactly(v) => write!(f, "== {v}"),
            Self::AtLeast(v) => write!(f, ">= {v}"),
            Self::CompatibleWith(v) => write!(f, "~> {v}"),
            Self::GitReference(reference) => write!(f, "\"{reference}\""),
        }
    }
}
