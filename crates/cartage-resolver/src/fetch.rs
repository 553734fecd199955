//! Sources of a dependency's own declared requirements.
//!
//! The graph builder only talks to [`RequirementFetcher`]; where the
//! requirements come from (memory, a checkout on disk) and how many reads
//! may run at once is up to the implementation.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cartage_core::cartfile::Cartfile;
use cartage_core::dependency::Dependency;
use cartage_core::version::VersionSpecifier;
use cartage_core::CARTFILE_NAME;
use tokio::sync::Semaphore;

use crate::error::FetchError;

/// Requirements declared by one package: `(child, specifier)` pairs.
pub type Requirements = Vec<(Dependency, VersionSpecifier)>;

/// Produces the requirements a dependency declares on other packages.
pub trait RequirementFetcher: Send + Sync + 'static {
    fn fetch(
        &self,
        dependency: &Dependency,
    ) -> impl Future<Output = Result<Requirements, FetchError>> + Send;
}

/// In-memory requirements, keyed by the requiring dependency.
///
/// Dependencies without an entry declare no requirements.
#[derive(Debug, Clone, Default)]
pub struct MapFetcher {
    requirements: BTreeMap<Dependency, Requirements>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the requirements of `dependency`, replacing earlier ones.
    pub fn insert(&mut self, dependency: Dependency, requirements: Requirements) {
        self.requirements.insert(dependency, requirements);
    }

    /// Builder form of [`MapFetcher::insert`] taking a parsed `Cartfile`.
    pub fn with_cartfile(mut self, dependency: Dependency, cartfile: Cartfile) -> Self {
        self.insert(dependency, cartfile.into_requirements());
        self
    }
}

impl RequirementFetcher for MapFetcher {
    async fn fetch(&self, dependency: &Dependency) -> Result<Requirements, FetchError> {
        Ok(self
            .requirements
            .get(dependency)
            .cloned()
            .unwrap_or_default())
    }
}

/// Reads `<checkouts>/<name>/Cartfile` for each dependency.
///
/// A checkout without a `Cartfile` declares no requirements. At most `jobs`
/// reads are in flight at once.
#[derive(Debug, Clone)]
pub struct CheckoutFetcher {
    checkouts: PathBuf,
    permits: Arc<Semaphore>,
}

impl CheckoutFetcher {
    pub fn new(checkouts: impl Into<PathBuf>, jobs: usize) -> Self {
        Self {
            checkouts: checkouts.into(),
            permits: Arc::new(Semaphore::new(jobs.max(1))),
        }
    }

    pub fn checkouts(&self) -> &Path {
        &self.checkouts
    }

    /// Location of the requirements manifest for `dependency`.
    pub fn cartfile_path(&self, dependency: &Dependency) -> PathBuf {
        self.checkouts.join(dependency.name()).join(CARTFILE_NAME)
    }
}

impl RequirementFetcher for CheckoutFetcher {
    async fn fetch(&self, dependency: &Dependency) -> Result<Requirements, FetchError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| FetchError::Other(e.to_string()))?;

        let path = self.cartfile_path(dependency);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No Cartfile for {dependency} at {}", path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(FetchError::Io { path, source }),
        };

        let cartfile: Cartfile = content
            .parse()
            .map_err(|source| FetchError::Parse {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(
            "Read {} requirements of {dependency} from {}",
            cartfile.len(),
            path.display()
        );
        Ok(cartfile.into_requirements())
    }
}
