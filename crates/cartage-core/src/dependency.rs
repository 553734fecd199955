//! Package identity: where a dependency comes from and what it is called.

use std::cmp::Ordering;
use std::fmt;

/// The kind of source a dependency is fetched from.
///
/// Variant order is the tie-break used when two dependencies share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    Binary,
    Git,
    GitHub,
}

impl SourceKind {
    /// Parse the leading keyword of a manifest line.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "binary" => Some(Self::Binary),
            "git" => Some(Self::Git),
            "github" => Some(Self::GitHub),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Git => "git",
            Self::GitHub => "github",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable package identifier.
///
/// Ordered by [`Dependency::name`] first, then by [`SourceKind`], then by the
/// full source text, so sorted output is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    /// A repository hosted on GitHub, `owner/name`.
    GitHub { owner: String, name: String },
    /// An arbitrary git remote.
    Git { url: String },
    /// A binary-only framework described by a JSON spec at `url`.
    Binary { url: String },
}

impl Dependency {
    pub fn github(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::GitHub {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn git(url: impl Into<String>) -> Self {
        Self::Git { url: url.into() }
    }

    pub fn binary(url: impl Into<String>) -> Self {
        Self::Binary { url: url.into() }
    }

    /// Build a dependency from a source keyword and its quoted source text.
    ///
    /// Returns `None` when the source text does not fit the kind (e.g. a
    /// `github` source that is not `owner/name`).
    pub fn from_source(kind: SourceKind, source: &str) -> Option<Self> {
        if source.is_empty() {
            return None;
        }
        match kind {
            SourceKind::GitHub => {
                let (owner, name) = source.split_once('/')?;
                if owner.is_empty() || name.is_empty() || name.contains('/') {
                    return None;
                }
                Some(Self::github(owner, name))
            }
            SourceKind::Git => Some(Self::git(source)),
            SourceKind::Binary => Some(Self::binary(source)),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            Self::GitHub { .. } => SourceKind::GitHub,
            Self::Git { .. } => SourceKind::Git,
            Self::Binary { .. } => SourceKind::Binary,
        }
    }

    /// The text that goes between quotes in a manifest line.
    pub fn source(&self) -> String {
        match self {
            Self::GitHub { owner, name } => format!("{owner}/{name}"),
            Self::Git { url } | Self::Binary { url } => url.clone(),
        }
    }

    /// Short, human-facing name used in diagnostics and checkout paths.
    ///
    /// For URLs this is the last path component with a `.git` or `.json`
    /// extension removed.
    pub fn name(&self) -> &str {
        match self {
            Self::GitHub { name, .. } => name,
            Self::Git { url } => last_component(url, ".git"),
            Self::Binary { url } => last_component(url, ".json"),
        }
    }
}

fn last_component<'a>(url: &'a str, extension: &str) -> &'a str {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(|c: char| c == '/' || c == ':')
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(extension).unwrap_or(last)
}

impl Ord for Dependency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name()
            .cmp(other.name())
            .then_with(|| self.kind().cmp(&other.kind()))
            .then_with(|| self.source().cmp(&other.source()))
    }
}

impl PartialOrd for Dependency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders the manifest form, e.g. `github "Moya/Moya"`.
impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind(), self.source())
    }
}

/// Why a `<kind> "<source>" ...` line could not be split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineError {
    MissingSource,
    UnterminatedQuote,
    UnknownKind,
    InvalidSource,
}

impl LineError {
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::MissingSource => "expected a quoted source after the source kind",
            Self::UnterminatedQuote => "unterminated quoted string",
            Self::UnknownKind => "unknown source kind (expected github, git or binary)",
            Self::InvalidSource => "source does not match its kind",
        }
    }
}

/// Split a manifest line into its dependency and the trimmed remainder.
pub(crate) fn split_dependency(line: &str) -> Result<(Dependency, &str), LineError> {
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .ok_or(LineError::MissingSource)?;
    let kind = SourceKind::parse(keyword).ok_or(LineError::UnknownKind)?;
    let (source, rest) = take_quoted(rest.trim_start())?.ok_or(LineError::MissingSource)?;
    let dependency = Dependency::from_source(kind, source).ok_or(LineError::InvalidSource)?;
    Ok((dependency, rest.trim()))
}

/// Take a leading `"..."` token. `Ok(None)` when the input does not start
/// with a quote.
pub(crate) fn take_quoted(input: &str) -> Result<Option<(&str, &str)>, LineError> {
    let Some(body) = input.strip_prefix('"') else {
        return Ok(None);
    };
    let end = body.find('"').ok_or(LineError::UnterminatedQuote)?;
    Ok(Some((&body[..end], &body[end + 1..])))
}

/// Drop a trailing `#` comment that is not inside quotes.
pub(crate) fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}
