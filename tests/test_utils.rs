//! Test utilities for pattern-server integration tests

use patterns::config::PatternConfig;
use patterns::mcp::PatternServer;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Fixture owning a pair of temporary pattern roots, laid out the way the
/// real `~/.config` trees are.
pub struct TestRoots {
    _dir: TempDir,
    pub fabric: PathBuf,
    pub custom: PathBuf,
}

impl TestRoots {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let fabric = dir.path().join(".config").join("fabric").join("patterns");
        let custom = dir.path().join(".config").join("custom_patterns");
        fs::create_dir_all(&fabric).expect("Failed to create fabric root");
        fs::create_dir_all(&custom).expect("Failed to create custom root");

        Self {
            _dir: dir,
            fabric,
            custom,
        }
    }

    /// Roots without the fabric directory, for directory-absence tests.
    pub fn without_fabric() -> Self {
        let roots = Self::new();
        fs::remove_dir_all(&roots.fabric).expect("Failed to remove fabric root");
        roots
    }

    pub fn server(&self) -> PatternServer {
        PatternServer::new(&PatternConfig::with_roots(
            self.fabric.clone(),
            self.custom.clone(),
        ))
    }

    pub fn add_fabric(&self, name: &str, system: Option<&str>, user: Option<&str>) {
        let dir = self.fabric.join(name);
        fs::create_dir_all(&dir).expect("Failed to create pattern dir");
        if let Some(system) = system {
            fs::write(dir.join("system.md"), system).expect("Failed to write system.md");
        }
        if let Some(user) = user {
            fs::write(dir.join("user.md"), user).expect("Failed to write user.md");
        }
    }

    pub fn add_custom(&self, name: &str, content: &str, metadata: Option<&str>) {
        fs::write(self.custom.join(format!("{name}.md")), content)
            .expect("Failed to write pattern file");
        if let Some(metadata) = metadata {
            fs::write(self.custom.join(format!("{name}.json")), metadata)
                .expect("Failed to write sidecar");
        }
    }
}
