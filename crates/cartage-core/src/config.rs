use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global user configuration loaded from `~/.cartage/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

/// Requirement fetching settings from `[fetch]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Upper bound on concurrent manifest reads.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
        }
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Project-relative locations from `[paths]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_checkouts")]
    pub checkouts: String,
    #[serde(default = "default_resolved")]
    pub resolved: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            checkouts: default_checkouts(),
            resolved: default_resolved(),
        }
    }
}

fn default_checkouts() -> String {
    "Carthage/Checkouts".to_string()
}

fn default_resolved() -> String {
    crate::RESOLVED_CARTFILE_NAME.to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.cartage/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from an explicit path, with defaults when the file is absent.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            tracing::debug!("No global config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            cartage_util::errors::CartageError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            cartage_util::errors::CartageError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }
}

/// Returns the path to the cartage data directory (`~/.cartage/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".cartage")
}
