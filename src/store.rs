// src/store.rs
// Reads the two on-disk pattern layouts and persists new custom patterns

use crate::catalog::{Catalog, PatternEntry, PatternPayload};
use crate::error::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Scans the fabric root (per-pattern subdirectories holding `system.md`
/// and/or `user.md`) and the custom root (flat `*.md` files with optional
/// `*.json` sidecars) into one catalog.
///
/// Both roots are optional: a missing directory contributes zero entries.
#[derive(Debug, Clone)]
pub struct PatternStore {
    fabric_root: PathBuf,
    custom_root: PathBuf,
}

impl PatternStore {
    pub fn new(fabric_root: PathBuf, custom_root: PathBuf) -> Self {
        Self {
            fabric_root,
            custom_root,
        }
    }

    pub fn fabric_root(&self) -> &Path {
        &self.fabric_root
    }

    pub fn custom_root(&self) -> &Path {
        &self.custom_root
    }

    /// Full rescan of both roots. Fabric entries load first so same-named
    /// custom entries overwrite them.
    pub fn scan(&self) -> Result<Catalog> {
        let mut catalog = Catalog::default();
        self.scan_fabric(&mut catalog)?;
        self.scan_custom(&mut catalog)?;
        debug!(patterns = catalog.len(), "catalog rebuilt");
        Ok(catalog)
    }

    fn scan_fabric(&self, catalog: &mut Catalog) -> Result<()> {
        if !self.fabric_root.is_dir() {
            return Ok(());
        }

        for dir_entry in fs::read_dir(&self.fabric_root)? {
            let path = dir_entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let system = read_optional(&path.join("system.md"))?;
            let user = read_optional(&path.join("user.md"))?;

            // A bare directory is not a pattern.
            if system.is_none() && user.is_none() {
                continue;
            }

            catalog.insert(PatternEntry {
                name: name.to_string(),
                path: path.clone(),
                payload: PatternPayload::Fabric { system, user },
            });
        }

        Ok(())
    }

    fn scan_custom(&self, catalog: &mut Catalog) -> Result<()> {
        if !self.custom_root.is_dir() {
            return Ok(());
        }

        for dir_entry in fs::read_dir(&self.custom_root)? {
            let path = dir_entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|n| n.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            let metadata = self.read_sidecar(&path)?;

            catalog.insert(PatternEntry {
                name: name.to_string(),
                path: path.clone(),
                payload: PatternPayload::Custom { content, metadata },
            });
        }

        Ok(())
    }

    /// Parse the `<stem>.json` sidecar next to a pattern file. An absent
    /// sidecar means empty metadata; a malformed one fails the whole scan.
    fn read_sidecar(&self, pattern_path: &Path) -> Result<Map<String, Value>> {
        let sidecar = pattern_path.with_extension("json");
        if !sidecar.is_file() {
            return Ok(Map::new());
        }
        let text = fs::read_to_string(&sidecar)?;
        let metadata: Map<String, Value> = serde_json::from_str(&text)?;
        Ok(metadata)
    }

    /// Target markdown file for a custom pattern name. The name is spliced
    /// into the path as-is; callers own deciding which names to accept.
    pub fn pattern_path(&self, name: &str) -> PathBuf {
        self.custom_root.join(format!("{name}.md"))
    }

    /// Persist a custom pattern: the body verbatim, plus a pretty-printed
    /// JSON sidecar when metadata is non-empty (no sidecar otherwise).
    pub fn write_pattern(
        &self,
        name: &str,
        content: &str,
        metadata: &Map<String, Value>,
    ) -> Result<PathBuf> {
        let path = self.pattern_path(name);
        fs::write(&path, content)?;

        if !metadata.is_empty() {
            let sidecar = path.with_extension("json");
            fs::write(&sidecar, serde_json::to_string_pretty(metadata)?)?;
        }

        debug!(name, path = %path.display(), "pattern written");
        Ok(path)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if path.is_file() {
        Ok(Some(fs::read_to_string(path)?))
    } else {
        Ok(None)
    }
}
