use serde::Deserialize;
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use tracing::warn;

use crate::module::Module;

/// Default manifest file name
pub const DEFAULT_MANIFEST_FILE: &str = "modules.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleManifest {
    #[serde(rename = "module", default)]
    pub modules: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub path: String,
    #[serde(default)]
    pub version: String,
    /// Module source tree, relative to the manifest
    pub dir: Option<PathBuf>,
    /// Declared license name
    pub license: Option<String>,
    /// Declared SPDX id
    pub spdx: Option<String>,
}

impl ManifestEntry {
    pub fn module(&self) -> Module {
        Module::new(self.path.clone(), self.version.clone())
    }
}

pub struct ManifestParser;

impl ManifestParser {
    /// Parse a module manifest. Relative `dir` entries are resolved against the
    /// manifest's own directory.
    pub fn parse_manifest<P: AsRef<Path>>(path: P) -> Result<ModuleManifest> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(anyhow::anyhow!("Module manifest not found: {}", path_ref.display()));
        }

        let content = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read module manifest: {}", path_ref.display()))?;

        let mut manifest: ModuleManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse module manifest as TOML: {}", path_ref.display()))?;

        if manifest.modules.is_empty() {
            warn!("Module manifest contains no modules: {}", path_ref.display());
        }

        let base = path_ref.parent().unwrap_or_else(|| Path::new(""));
        for entry in &mut manifest.modules {
            if let Some(dir) = &entry.dir {
                if dir.is_relative() {
                    entry.dir = Some(base.join(dir));
                }
            }
        }

        Ok(manifest)
    }

    /// Entries with a usable module path
    pub fn extract_entries(manifest: &ModuleManifest) -> Vec<ManifestEntry> {
        manifest.modules
            .iter()
            .filter(|entry| {
                if entry.path.trim().is_empty() {
                    warn!("Skipping module with empty path");
                    return false;
                }
                true
            })
            .cloned()
            .collect()
    }
}
