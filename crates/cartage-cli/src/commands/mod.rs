//! Command dispatch and handler modules.

mod graph;
mod validate;
mod why;

use std::path::Path;

use cartage_ops::Project;
use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Validate { project_dir } => {
            validate::exec(project_dir.as_deref(), cli.verbose).await
        }
        Command::Graph { project_dir, json } => graph::exec(project_dir.as_deref(), json).await,
        Command::Why { name, project_dir } => why::exec(&name, project_dir.as_deref()).await,
    }
}

fn locate(project_dir: Option<&Path>) -> Result<Project> {
    let config = cartage_ops::load_config();
    Project::locate(project_dir, &config)
}
