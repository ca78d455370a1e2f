//! Configuration file resolution.
//!
//! Resolves the configuration file path using a deterministic priority
//! order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `{project}/relint.toml` or `.relint.toml`
//! 3. No config found, defaults are used

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["relint.toml", ".relint.toml"];

/// Resolves the configuration file path.
///
/// `target` is the file or directory being checked; project config is
/// looked up next to a file target, or inside a directory target.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    // Explicit path is trusted as-is; the caller reports a missing file
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let project_dir = if target.is_file() {
        target.parent().unwrap_or(Path::new("."))
    } else {
        target
    };

    for name in PROJECT_CONFIG_NAMES {
        let candidate = project_dir.join(name);
        if candidate.exists() {
            tracing::debug!("Found project config: {}", candidate.display());
            return ConfigSource::Project(candidate);
        }
    }

    ConfigSource::Default
}
