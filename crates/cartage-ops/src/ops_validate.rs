//! Operation: check the project's pins against every declared requirement.

use cartage_util::progress::status;

use crate::Project;

/// Validate `Cartfile.resolved` of `project`.
///
/// With `verbose`, every pinned dependency of a compatible manifest is
/// listed with the number of requirements it was checked against.
pub async fn validate(project: &Project, verbose: bool) -> miette::Result<()> {
    let resolved = project.load_resolved()?;
    let graph = project.validate(&resolved).await?;

    if verbose {
        for (dependency, pinned) in resolved.iter() {
            let count = graph.requirers_of(dependency).map_or(0, |r| r.len());
            status(
                "Checked",
                &format!("{} {pinned} against {count} requirement(s)", dependency.name()),
            );
        }
    }

    status(
        "Validated",
        &format!(
            "{} pinned dependencies in {}",
            resolved.len(),
            project.resolved_path.display()
        ),
    );
    Ok(())
}
