//! Handler for `cartage why`.

use std::path::Path;

use miette::Result;

use cartage_ops::ops_why;

pub async fn exec(name: &str, project_dir: Option<&Path>) -> Result<()> {
    let project = super::locate(project_dir)?;
    tracing::debug!("Explaining pin of {name} in {}", project.root.display());
    ops_why::why(&project, name).await
}
