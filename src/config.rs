// src/config.rs
// Pattern root resolution - single source of truth for directory env vars

use crate::error::{PatternError, Result};
use std::path::PathBuf;
use tracing::debug;

/// Filesystem roots the server scans and writes.
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Fabric-style patterns: `<root>/<name>/{system.md,user.md}`. Read-only.
    pub fabric_root: PathBuf,
    /// Custom patterns: `<root>/<name>.md` + optional `<name>.json`. Read-write.
    pub custom_root: PathBuf,
}

impl PatternConfig {
    /// Resolve roots from `PATTERNS_FABRIC_DIR` / `PATTERNS_CUSTOM_DIR`,
    /// falling back to the conventional locations under the home directory.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| PatternError::Config("home directory not found".to_string()))?;

        let fabric_root = read_path_env("PATTERNS_FABRIC_DIR")
            .unwrap_or_else(|| home.join(".config").join("fabric").join("patterns"));
        let custom_root = read_path_env("PATTERNS_CUSTOM_DIR")
            .unwrap_or_else(|| home.join(".config").join("custom_patterns"));

        debug!(
            fabric = %fabric_root.display(),
            custom = %custom_root.display(),
            "pattern roots resolved"
        );

        Ok(Self {
            fabric_root,
            custom_root,
        })
    }

    pub fn with_roots(fabric_root: PathBuf, custom_root: PathBuf) -> Self {
        Self {
            fabric_root,
            custom_root,
        }
    }

    /// Create the custom root if absent. The fabric root is never created;
    /// it belongs to Fabric's own tooling.
    pub fn ensure_custom_root(&self) -> Result<()> {
        std::fs::create_dir_all(&self.custom_root)?;
        Ok(())
    }
}

/// Read a directory override from the environment, filtering empty values.
fn read_path_env(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
