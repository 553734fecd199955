//! Operation: explain why one dependency is pinned where it is.

use cartage_util::errors::CartageError;

use crate::Project;

/// Print the requirers of `name` (a short name or `owner/name` source).
pub async fn why(project: &Project, name: &str) -> miette::Result<()> {
    let resolved = project.load_resolved()?;
    if resolved.find(name).is_none() {
        return Err(CartageError::Generic {
            message: format!("'{name}' is not pinned in {}", project.resolved_path.display()),
        }
        .into());
    }

    let graph = project.requirement_graph(&resolved).await?;
    if let Some(output) = graph.why(&resolved, name) {
        print!("{output}");
    }
    Ok(())
}
