//! Handler for `cartage graph`.

use std::path::Path;

use miette::Result;

use cartage_ops::ops_graph;

pub async fn exec(project_dir: Option<&Path>, json: bool) -> Result<()> {
    let project = super::locate(project_dir)?;
    ops_graph::graph(&project, json).await
}
