//! Operation: display who requires each pinned dependency.

use std::collections::BTreeMap;

use cartage_resolver::graph::RequirementGraph;
use cartage_util::errors::CartageError;
use serde::Serialize;

use crate::Project;

#[derive(Debug, Serialize)]
struct RequirerEntry {
    requirer: String,
    specifier: String,
}

/// Print the requirement graph of `project` as a tree, or as JSON.
pub async fn graph(project: &Project, json: bool) -> miette::Result<()> {
    let resolved = project.load_resolved()?;
    let graph = project.requirement_graph(&resolved).await?;

    if json {
        println!("{}", render_json(&graph)?);
        return Ok(());
    }

    let output = graph.print_inverted(&resolved);
    if output.is_empty() {
        println!("No pinned dependency is required by another.");
    } else {
        print!("{output}");
    }
    Ok(())
}

/// `{ "<name>": [{ "requirer": "<name>", "specifier": "~> 1.0.0" }] }`
pub fn render_json(graph: &RequirementGraph) -> miette::Result<String> {
    let map: BTreeMap<&str, Vec<RequirerEntry>> = graph
        .iter()
        .map(|(dependency, requirers)| {
            let entries = requirers
                .iter()
                .map(|(requirer, specifier)| RequirerEntry {
                    requirer: requirer.name().to_string(),
                    specifier: specifier.to_string(),
                })
                .collect();
            (dependency.name(), entries)
        })
        .collect();

    serde_json::to_string_pretty(&map).map_err(|e| {
        CartageError::Generic {
            message: format!("Failed to serialize requirement graph: {e}"),
        }
        .into()
    })
}
