pub mod ops_graph;
pub mod ops_validate;
pub mod ops_why;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cartage_core::config::GlobalConfig;
use cartage_core::resolved::ResolvedCartfile;
use cartage_resolver::error::CoreError;
use cartage_resolver::fetch::CheckoutFetcher;
use cartage_resolver::graph::{build_requirement_graph, RequirementGraph};
use cartage_resolver::validate::validate_resolved;
use cartage_util::errors::{CartageError, CartageResult};
use cartage_util::progress::{spinner, status_warn};

/// A located project: where its resolved manifest and checkouts live.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub resolved_path: PathBuf,
    pub checkouts: PathBuf,
    pub jobs: usize,
}

impl Project {
    /// Locate the project rooted at `project_dir`, or the nearest ancestor of
    /// the current directory holding the resolved manifest.
    pub fn locate(project_dir: Option<&Path>, config: &GlobalConfig) -> CartageResult<Self> {
        let resolved_name = config.paths.resolved.as_str();
        let root = match project_dir {
            Some(dir) => dir.to_path_buf(),
            None => {
                let cwd = std::env::current_dir().map_err(CartageError::Io)?;
                cartage_util::fs::find_ancestor_with(&cwd, resolved_name).ok_or_else(|| {
                    CartageError::Manifest {
                        message: format!(
                            "No {resolved_name} found in {} or any parent directory",
                            cwd.display()
                        ),
                    }
                })?
            }
        };

        let resolved_path = root.join(resolved_name);
        if !resolved_path.is_file() {
            return Err(CartageError::Manifest {
                message: format!("No {resolved_name} found in {}", root.display()),
            }
            .into());
        }

        Ok(Self {
            checkouts: root.join(&config.paths.checkouts),
            resolved_path,
            root,
            jobs: config.fetch.jobs,
        })
    }

    pub fn load_resolved(&self) -> CartageResult<ResolvedCartfile> {
        ResolvedCartfile::from_path(&self.resolved_path)
    }

    pub fn fetcher(&self) -> CheckoutFetcher {
        CheckoutFetcher::new(&self.checkouts, self.jobs)
    }

    /// Read every pinned dependency's checkout and build the requirement graph.
    pub async fn requirement_graph(
        &self,
        resolved: &ResolvedCartfile,
    ) -> CartageResult<RequirementGraph> {
        let work = build_requirement_graph(resolved, Arc::new(self.fetcher()));
        self.fetch_with_progress(resolved, work).await
    }

    /// Build the requirement graph and check every pin against it.
    ///
    /// Returns the graph when all pins are compatible.
    pub async fn validate(&self, resolved: &ResolvedCartfile) -> CartageResult<RequirementGraph> {
        let work = validate_resolved(resolved, Arc::new(self.fetcher()));
        self.fetch_with_progress(resolved, work).await
    }

    async fn fetch_with_progress<T>(
        &self,
        resolved: &ResolvedCartfile,
        work: impl Future<Output = Result<T, CoreError>>,
    ) -> CartageResult<T> {
        if !self.checkouts.is_dir() {
            status_warn(
                "Warning",
                &format!(
                    "no checkouts at {}, pinned dependencies declare no requirements",
                    self.checkouts.display()
                ),
            );
        }

        let sp = spinner(&format!(
            "Reading requirements of {} dependencies...",
            resolved.len()
        ));
        let outcome = work.await;
        sp.finish_and_clear();
        outcome.map_err(into_report)
    }
}

/// Load the global configuration, falling back to defaults when it is
/// unreadable.
pub fn load_config() -> GlobalConfig {
    match GlobalConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring global config: {e}");
            GlobalConfig::default()
        }
    }
}

/// Convert an engine error into a report, surfacing incompatibilities as
/// a validation failure.
pub fn into_report(err: CoreError) -> miette::Report {
    match err {
        CoreError::Incompatible(validation) => CartageError::Validation {
            message: validation.to_string(),
        }
        .into(),
        other => miette::Report::new(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn locate_explicit_project_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Cartfile.resolved"), "").unwrap();

        let project = Project::locate(Some(tmp.path()), &GlobalConfig::default()).unwrap();
        assert_eq!(project.root, tmp.path());
        assert_eq!(project.checkouts, tmp.path().join("Carthage/Checkouts"));
    }

    #[test]
    fn locate_honours_configured_paths() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Pins.resolved"), "").unwrap();

        let mut config = GlobalConfig::default();
        config.paths.resolved = "Pins.resolved".into();
        config.paths.checkouts = "vendor".into();
        config.fetch.jobs = 3;

        let project = Project::locate(Some(tmp.path()), &config).unwrap();
        assert_eq!(project.resolved_path, tmp.path().join("Pins.resolved"));
        assert_eq!(project.checkouts, tmp.path().join("vendor"));
        assert_eq!(project.jobs, 3);
    }

    #[test]
    fn locate_without_manifest_fails() {
        let tmp = TempDir::new().unwrap();
        let err = Project::locate(Some(tmp.path()), &GlobalConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No Cartfile.resolved found"));
    }
}
