//! Handler for `cartage validate`.

use std::path::Path;

use miette::Result;

use cartage_ops::ops_validate;

pub async fn exec(project_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let project = super::locate(project_dir)?;
    ops_validate::validate(&project, verbose).await
}
