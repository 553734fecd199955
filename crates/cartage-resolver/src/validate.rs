//! Checking pinned versions against the requirements placed on them.

use std::collections::BTreeMap;
use std::sync::Arc;

use cartage_core::dependency::Dependency;
use cartage_core::resolved::ResolvedCartfile;
use cartage_core::version::{PinnedVersion, VersionSpecifier};
use miette::Diagnostic;
use thiserror::Error;

use crate::error::CoreError;
use crate::fetch::RequirementFetcher;
use crate::graph::{build_requirement_graph, RequirementGraph};

const HEADER: &str = "The following incompatibilities were found in Cartfile.resolved:";

/// One pinned dependency and the requirements its pin violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityInfo {
    dependency: Dependency,
    pinned_version: PinnedVersion,
    incompatible_requirements: BTreeMap<Dependency, VersionSpecifier>,
}

impl CompatibilityInfo {
    pub fn dependency(&self) -> &Dependency {
        &self.dependency
    }

    pub fn pinned_version(&self) -> &PinnedVersion {
        &self.pinned_version
    }

    /// Violated requirements, sorted by requiring dependency.
    pub fn incompatible_requirements(&self) -> &BTreeMap<Dependency, VersionSpecifier> {
        &self.incompatible_requirements
    }
}

/// The pinned versions of a resolved manifest violate declared requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{}", render_incompatibilities(.infos))]
#[diagnostic(help("adjust the listed pins or the requirements that reject them"))]
pub struct ValidationError {
    infos: Vec<CompatibilityInfo>,
}

impl ValidationError {
    /// Offending dependencies, sorted by dependency.
    pub fn infos(&self) -> &[CompatibilityInfo] {
        &self.infos
    }
}

/// Render the diagnostic text: a header line, then one bullet per violated
/// requirement, in the order of `infos`.
pub fn render_incompatibilities(infos: &[CompatibilityInfo]) -> String {
    let mut lines = vec![HEADER.to_string()];
    for info in infos {
        for (requirer, specifier) in &info.incompatible_requirements {
            lines.push(format!(
                "* {} \"{}\" is incompatible with {} {}",
                info.dependency.name(),
                info.pinned_version,
                requirer.name(),
                specifier
            ));
        }
    }
    lines.join("\n")
}

/// Check every pin in `resolved` against its incoming requirements.
pub fn validate(resolved: &ResolvedCartfile, graph: &RequirementGraph) -> Result<(), ValidationError> {
    let mut infos: Vec<CompatibilityInfo> = resolved
        .iter()
        .filter_map(|(dependency, pinned)| {
            let requirers = graph.requirers_of(dependency)?;
            let incompatible: BTreeMap<Dependency, VersionSpecifier> = requirers
                .iter()
                .filter(|(_, specifier)| !specifier.is_satisfied_by(pinned))
                .map(|(requirer, specifier)| (requirer.clone(), specifier.clone()))
                .collect();
            (!incompatible.is_empty()).then(|| CompatibilityInfo {
                dependency: dependency.clone(),
                pinned_version: pinned.clone(),
                incompatible_requirements: incompatible,
            })
        })
        .collect();

    if infos.is_empty() {
        return Ok(());
    }
    infos.sort_by(|a, b| a.dependency.cmp(&b.dependency));
    Err(ValidationError { infos })
}

/// Build the requirement graph for `resolved` and validate against it.
///
/// On success the graph the pins were checked against is returned.
pub async fn validate_resolved<F>(
    resolved: &ResolvedCartfile,
    fetcher: Arc<F>,
) -> Result<RequirementGraph, CoreError>
where
    F: RequirementFetcher,
{
    let graph = build_requirement_graph(resolved, fetcher).await?;
    validate(resolved, &graph)?;
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartage_core::version::SemanticVersion;

    fn spec(major: u64, minor: u64, patch: u64) -> VersionSpecifier {
        VersionSpecifier::CompatibleWith(SemanticVersion::new(major, minor, patch))
    }

    #[test]
    fn empty_graph_is_valid() {
        let resolved: ResolvedCartfile = "github \"a/A\" \"1.0.0\"".parse().unwrap();
        assert!(validate(&resolved, &RequirementGraph::default()).is_ok());
    }

    #[test]
    fn renders_each_specifier_kind() {
        let resolved: ResolvedCartfile = "github \"t/Target\" \"2.0.0\"\n".parse().unwrap();
        let target = Dependency::github("t", "Target");
        let graph = RequirementGraph::from_requirements(vec![
            (
                Dependency::github("a", "Exact"),
                vec![(target.clone(), VersionSpecifier::Exactly(SemanticVersion::new(1, 0, 0)))],
            ),
            (
                Dependency::github("b", "Floor"),
                vec![(target.clone(), VersionSpecifier::AtLeast(SemanticVersion::new(3, 0, 0)))],
            ),
            (
                Dependency::github("c", "Branch"),
                vec![(target.clone(), VersionSpecifier::GitReference("develop".into()))],
            ),
            (Dependency::github("d", "Caret"), vec![(target, spec(1, 2, 0))]),
        ])
        .unwrap();

        let err = validate(&resolved, &graph).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The following incompatibilities were found in Cartfile.resolved:\n\
             * Target \"2.0.0\" is incompatible with Branch \"develop\"\n\
             * Target \"2.0.0\" is incompatible with Caret ~> 1.2.0\n\
             * Target \"2.0.0\" is incompatible with Exact == 1.0.0\n\
             * Target \"2.0.0\" is incompatible with Floor >= 3.0.0"
        );
    }

    #[test]
    fn infos_sorted_by_dependency_name() {
        let resolved: ResolvedCartfile =
            "github \"z/Zed\" \"2.0.0\"\ngithub \"a/Able\" \"2.0.0\"\n".parse().unwrap();
        let parent = Dependency::github("p", "Parent");
        let graph = RequirementGraph::from_requirements(vec![(
            parent,
            vec![
                (Dependency::github("z", "Zed"), spec(1, 0, 0)),
                (Dependency::github("a", "Able"), spec(1, 0, 0)),
            ],
        )])
        .unwrap();

        let err = validate(&resolved, &graph).unwrap_err();
        let names: Vec<&str> = err.infos().iter().map(|i| i.dependency().name()).collect();
        assert_eq!(names, ["Able", "Zed"]);
    }

    #[test]
    fn same_name_ties_broken_by_source_kind() {
        let resolved: ResolvedCartfile = "github \"o/Shared\" \"2.0.0\"\n\
                                          git \"https://example.com/Shared.git\" \"2.0.0\"\n"
            .parse()
            .unwrap();
        let parent = Dependency::github("p", "Parent");
        let graph = RequirementGraph::from_requirements(vec![(
            parent,
            vec![
                (Dependency::github("o", "Shared"), spec(1, 0, 0)),
                (Dependency::git("https://example.com/Shared.git"), spec(1, 0, 0)),
            ],
        )])
        .unwrap();

        let err = validate(&resolved, &graph).unwrap_err();
        let kinds: Vec<&str> = err
            .infos()
            .iter()
            .map(|i| i.dependency().kind().as_str())
            .collect();
        assert_eq!(kinds, ["git", "github"]);
    }
}
