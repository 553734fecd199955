//! CLI argument definitions for Cartage.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cartage",
    version,
    about = "Check that Cartfile.resolved satisfies every declared requirement",
    long_about = "Cartage re-reads the Cartfile of every checked-out dependency and reports \
                  each pinned version in Cartfile.resolved that violates a requirement \
                  declared by another pinned dependency."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate pinned versions against declared requirements
    Validate {
        /// Project directory (defaults to the nearest ancestor with Cartfile.resolved)
        #[arg(long, env = "CARTAGE_PROJECT_DIR")]
        project_dir: Option<PathBuf>,
    },

    /// Show who requires each pinned dependency
    Graph {
        /// Project directory
        #[arg(long, env = "CARTAGE_PROJECT_DIR")]
        project_dir: Option<PathBuf>,
        /// Print the graph as JSON
        #[arg(long)]
        json: bool,
    },

    /// Explain why a dependency is pinned the way it is
    Why {
        /// Dependency name or owner/name source
        name: String,
        /// Project directory
        #[arg(long, env = "CARTAGE_PROJECT_DIR")]
        project_dir: Option<PathBuf>,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
