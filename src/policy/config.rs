use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// License rule: exact names/SPDX ids plus glob patterns
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LicenseRule {
    /// Exact license names or SPDX ids
    #[serde(default)]
    pub exact: Vec<String>,
    /// Glob patterns (e.g. "GPL-*", "BSD-*")
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// License policy for one audit run
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Policy {
    /// Allowed licenses
    #[serde(default)]
    pub allow: LicenseRule,
    /// Denied licenses, checked before `allow`
    #[serde(default)]
    pub deny: LicenseRule,
    /// Module path -> override directory
    #[serde(default, rename = "override")]
    pub overrides: IndexMap<String, String>,
    /// Base directory holding `<module path>/LICENSE` override files
    #[serde(default)]
    pub override_path: PathBuf,
    /// Output base; artifacts land under its directory portion
    #[serde(default)]
    pub exec_path: PathBuf,
}
