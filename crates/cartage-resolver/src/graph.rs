//! Requirement-graph construction: who requires each resolved dependency,
//! and at what constraint.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use cartage_core::dependency::Dependency;
use cartage_core::resolved::ResolvedCartfile;
use cartage_core::version::VersionSpecifier;
use tokio::task::JoinSet;

use crate::error::CoreError;
use crate::fetch::{RequirementFetcher, Requirements};
use crate::invert::{invert, InversionConflict};

/// `parent → (child → specifier)`: what each package requires.
pub type RequirementsByParent = BTreeMap<Dependency, BTreeMap<Dependency, VersionSpecifier>>;

/// `child → (requiring parent → specifier)`, restricted to the dependencies
/// of one resolved manifest.
///
/// A dependency is a key only if at least one other resolved dependency
/// declares a requirement on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementGraph {
    requirers: BTreeMap<Dependency, BTreeMap<Dependency, VersionSpecifier>>,
}

impl RequirementGraph {
    /// Build the graph from a parent-first view.
    pub fn from_requirements<I, J>(
        requirements: I,
    ) -> Result<Self, InversionConflict<Dependency, Dependency, VersionSpecifier>>
    where
        I: IntoIterator<Item = (Dependency, J)>,
        J: IntoIterator<Item = (Dependency, VersionSpecifier)>,
    {
        Ok(Self {
            requirers: invert(requirements)?,
        })
    }

    /// Everyone who requires `dependency`, sorted by requirer.
    pub fn requirers_of(
        &self,
        dependency: &Dependency,
    ) -> Option<&BTreeMap<Dependency, VersionSpecifier>> {
        self.requirers.get(dependency)
    }

    pub fn contains(&self, dependency: &Dependency) -> bool {
        self.requirers.contains_key(dependency)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Dependency, &BTreeMap<Dependency, VersionSpecifier>)> {
        self.requirers.iter()
    }

    /// Number of depended-upon dependencies.
    pub fn len(&self) -> usize {
        self.requirers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirers.is_empty()
    }

    /// Render every depended-upon dependency with its requirers below it.
    ///
    /// ```text
    /// Result 3.2.4
    /// ├── Moya ~> 3.1.0
    /// └── ReactiveSwift ~> 3.2.1
    /// ```
    pub fn print_inverted(&self, resolved: &ResolvedCartfile) -> String {
        let mut output = String::new();
        for dependency in self.requirers.keys() {
            self.print_block(&mut output, dependency, resolved);
            output.push('\n');
        }
        output
    }

    /// Render why `key` (a name or `owner/name` source) is pinned the way
    /// it is. `None` if the key is not in the resolved manifest.
    pub fn why(&self, resolved: &ResolvedCartfile, key: &str) -> Option<String> {
        let (dependency, _) = resolved.find(key)?;
        let mut output = String::new();
        self.print_block(&mut output, dependency, resolved);
        Some(output)
    }

    fn print_block(&self, output: &mut String, dependency: &Dependency, resolved: &ResolvedCartfile) {
        let pinned = resolved
            .version_of(dependency)
            .map(|v| v.raw())
            .unwrap_or("?");
        output.push_str(&format!("{} {pinned}\n", dependency.name()));

        let Some(requirers) = self.requirers.get(dependency) else {
            output.push_str("└── (not required by any other dependency)\n");
            return;
        };
        let count = requirers.len();
        for (i, (requirer, specifier)) in requirers.iter().enumerate() {
            let connector = if i == count - 1 { "└── " } else { "├── " };
            output.push_str(&format!("{connector}{} {specifier}\n", requirer.name()));
        }
    }
}

/// Fetch every resolved dependency's own requirements concurrently and
/// group them by requiring dependency.
///
/// Requirements on packages outside the resolved manifest are dropped, as
/// are requirements of a package on itself. Parents left without
/// requirements are omitted. The first failed fetch
/// cancels the rest and fails the whole call.
pub async fn requirements_by_dependency<F>(
    resolved: &ResolvedCartfile,
    fetcher: Arc<F>,
) -> Result<RequirementsByParent, CoreError>
where
    F: RequirementFetcher,
{
    let fetched = fetch_all(resolved, fetcher).await?;
    let in_resolution: HashSet<&Dependency> = resolved.dependencies().collect();

    let mut grouped = RequirementsByParent::new();
    for (parent, requirements) in fetched {
        let mut children = BTreeMap::new();
        for (child, specifier) in requirements {
            if !in_resolution.contains(&child) {
                tracing::debug!("Ignoring {parent} requirement on {child}: not in the resolved manifest");
                continue;
            }
            if child == parent {
                tracing::debug!("Ignoring {parent} requirement on itself");
                continue;
            }
            match children.entry(child) {
                Entry::Vacant(slot) => {
                    slot.insert(specifier);
                }
                Entry::Occupied(slot) if *slot.get() == specifier => {}
                Entry::Occupied(slot) => {
                    let (child, existing) = slot.remove_entry();
                    return Err(CoreError::InversionConflict {
                        parent,
                        child,
                        existing,
                        conflicting: specifier,
                    });
                }
            }
        }
        if !children.is_empty() {
            grouped.insert(parent, children);
        }
    }
    Ok(grouped)
}

/// Build the child-first [`RequirementGraph`] for a resolved manifest.
pub async fn build_requirement_graph<F>(
    resolved: &ResolvedCartfile,
    fetcher: Arc<F>,
) -> Result<RequirementGraph, CoreError>
where
    F: RequirementFetcher,
{
    let grouped = requirements_by_dependency(resolved, fetcher).await?;
    let graph = RequirementGraph::from_requirements(grouped)?;
    tracing::debug!(
        "Requirement graph covers {} of {} resolved dependencies",
        graph.len(),
        resolved.len()
    );
    Ok(graph)
}

/// Scatter one fetch per dependency, gather them all before merging.
///
/// Results are keyed by dependency so the merge does not depend on
/// completion order.
async fn fetch_all<F>(
    resolved: &ResolvedCartfile,
    fetcher: Arc<F>,
) -> Result<BTreeMap<Dependency, Requirements>, CoreError>
where
    F: RequirementFetcher,
{
    tracing::debug!("Fetching requirements for {} dependencies", resolved.len());

    let mut join_set = JoinSet::new();
    for dependency in resolved.dependencies() {
        let dependency = dependency.clone();
        let fetcher = Arc::clone(&fetcher);
        join_set.spawn(async move {
            let result = fetcher.fetch(&dependency).await;
            (dependency, result)
        });
    }

    let mut fetched = BTreeMap::new();
    while let Some(joined) = join_set.join_next().await {
        let (dependency, result) = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                join_set.abort_all();
                return Err(CoreError::TaskFailed(e.to_string()));
            }
        };
        match result {
            Ok(requirements) => {
                fetched.insert(dependency, requirements);
            }
            Err(source) => {
                join_set.abort_all();
                return Err(CoreError::Fetch { dependency, source });
            }
        }
    }
    Ok(fetched)
}
