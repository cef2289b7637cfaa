use anyhow::Result;
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use super::config::{LicenseRule, Policy};
use crate::license::License;

/// Policy verdict for one license
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationState {
    Allowed,
    Denied,
    Unknown,
}

impl ClassificationState {
    pub fn is_failure(self) -> bool {
        self != ClassificationState::Allowed
    }
}

impl fmt::Display for ClassificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClassificationState::Allowed => "allowed",
            ClassificationState::Denied => "denied",
            ClassificationState::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

impl LicenseRule {
    /// Check whether the rule matches any of the given identifiers
    pub fn matches(&self, ids: &[&str]) -> bool {
        self.find_match(ids).is_some()
    }

    /// Return the matching rule (exact or pattern)
    pub fn find_match(&self, ids: &[&str]) -> Option<String> {
        let ids: Vec<&str> = ids.iter().copied().filter(|id| !id.is_empty()).collect();

        for exact in &self.exact {
            if ids.iter().any(|id| exact == id) {
                return Some(format!("exact: {}", exact));
            }
        }

        for pattern_str in &self.patterns {
            if let Ok(pattern) = Pattern::new(pattern_str) {
                if ids.iter().any(|id| pattern.matches(id)) {
                    return Some(format!("pattern: {}", pattern_str));
                }
            }
        }

        None
    }

    fn validate(&self, section: &str) -> Result<()> {
        for pattern in &self.patterns {
            Pattern::new(pattern)
                .map_err(|e| anyhow::anyhow!("Invalid pattern '{}' in [{}]: {}", pattern, section, e))?;
        }
        Ok(())
    }
}

impl Policy {
    /// Classify a license. A missing license is always `Unknown`.
    pub fn classify(&self, license: Option<&License>) -> ClassificationState {
        let license = match license {
            Some(license) => license,
            None => return ClassificationState::Unknown,
        };
        let ids = [license.spdx.as_str(), license.name.as_str()];

        // Deny wins over allow
        if self.deny.matches(&ids) {
            return ClassificationState::Denied;
        }
        if self.allow.matches(&ids) {
            return ClassificationState::Allowed;
        }

        ClassificationState::Unknown
    }

    /// Override directory declared for this exact module path, if any
    pub fn override_for(&self, module_path: &str) -> Option<&str> {
        self.overrides
            .get(module_path)
            .map(String::as_str)
            .filter(|dir| !dir.is_empty())
    }

    /// Location of the override license file for a module
    pub fn override_file(&self, module_path: &str) -> PathBuf {
        self.override_path.join(module_subpath(module_path)).join("LICENSE")
    }

    /// Directory portion of `exec_path`; artifacts go under `<root>/License/`
    pub fn artifact_root(&self) -> PathBuf {
        let raw = self.exec_path.to_string_lossy();
        if raw.is_empty() || raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR) {
            return self.exec_path.clone();
        }
        self.exec_path.parent().map(Path::to_path_buf).unwrap_or_default()
    }

    /// Artifact directory for a module
    pub fn artifact_dir(&self, module_path: &str) -> PathBuf {
        self.artifact_root().join("License").join(module_subpath(module_path))
    }

    /// Reject patterns that do not compile
    pub fn validate(&self) -> Result<()> {
        self.allow.validate("allow")?;
        self.deny.validate("deny")?;
        Ok(())
    }
}

/// Module path as a relative path: root, prefix, `.` and `..` components are
/// dropped so joining it never leaves the base directory.
fn module_subpath(module_path: &str) -> PathBuf {
    Path::new(module_path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_policy() -> Policy {
        Policy {
            allow: LicenseRule {
                exact: vec!["MIT".to_string(), "Apache-2.0".to_string()],
                patterns: vec!["BSD-*".to_string()],
            },
            deny: LicenseRule {
                exact: vec!["GPL-3.0".to_string()],
                patterns: vec!["AGPL-*".to_string()],
            },
            ..Policy::default()
        }
    }

    #[test]
    fn test_license_rule_exact_match() {
        let rule = LicenseRule {
            exact: vec!["MIT".to_string(), "Apache-2.0".to_string()],
            patterns: vec![],
        };

        assert!(rule.matches(&["MIT"]));
        assert!(rule.matches(&["", "Apache-2.0"]));
        assert!(!rule.matches(&["GPL-3.0"]));
        assert!(!rule.matches(&[""]));
    }

    #[test]
    fn test_license_rule_pattern_match() {
        let rule = LicenseRule {
            exact: vec![],
            patterns: vec!["GPL-*".to_string(), "BSD-*".to_string()],
        };

        assert!(rule.matches(&["GPL-3.0"]));
        assert!(rule.matches(&["BSD-3-Clause"]));
        assert!(!rule.matches(&["MIT"]));
        assert_eq!(rule.find_match(&["BSD-2-Clause"]), Some("pattern: BSD-*".to_string()));
    }

    #[test]
    fn test_classify() {
        let policy = test_policy();

        let mit = License::new("MIT", "MIT", "MIT TEXT");
        let gpl = License::new("GPL-3.0", "", "...");
        let agpl = License::new("GNU Affero", "AGPL-3.0", "...");
        let bsd = License::new("BSD 3-Clause", "BSD-3-Clause", "...");
        let other = License::new("Proprietary", "", "...");

        assert_eq!(policy.classify(Some(&mit)), ClassificationState::Allowed);
        assert_eq!(policy.classify(Some(&gpl)), ClassificationState::Denied);
        assert_eq!(policy.classify(Some(&agpl)), ClassificationState::Denied);
        assert_eq!(policy.classify(Some(&bsd)), ClassificationState::Allowed);
        assert_eq!(policy.classify(Some(&other)), ClassificationState::Unknown);
        assert_eq!(policy.classify(None), ClassificationState::Unknown);
    }

    #[test]
    fn test_deny_checked_before_allow() {
        let mut policy = test_policy();
        policy.allow.exact.push("GPL-3.0".to_string());

        let gpl = License::new("GPL-3.0", "GPL-3.0", "...");
        assert_eq!(policy.classify(Some(&gpl)), ClassificationState::Denied);
    }

    #[test]
    fn test_override_for_exact_path_only() {
        let mut policy = test_policy();
        policy.overrides.insert("github.com/x/w".to_string(), "w".to_string());
        policy.overrides.insert("github.com/x/empty".to_string(), String::new());

        assert_eq!(policy.override_for("github.com/x/w"), Some("w"));
        assert_eq!(policy.override_for("github.com/x/w/sub"), None);
        assert_eq!(policy.override_for("github.com/x"), None);
        assert_eq!(policy.override_for("github.com/x/empty"), None);
    }

    #[test]
    fn test_artifact_root() {
        let mut policy = Policy::default();
        assert_eq!(policy.artifact_dir("a/b"), PathBuf::from("License/a/b"));

        policy.exec_path = PathBuf::from("dist/");
        assert_eq!(policy.artifact_dir("a/b"), PathBuf::from("dist/License/a/b"));

        policy.exec_path = PathBuf::from("dist/bin/auditor");
        assert_eq!(policy.artifact_dir("a/b"), PathBuf::from("dist/bin/License/a/b"));
    }

    #[test]
    fn test_module_paths_stay_under_base() {
        let policy = Policy {
            override_path: PathBuf::from("overrides"),
            exec_path: PathBuf::from("dist/"),
            ..Policy::default()
        };

        assert_eq!(policy.artifact_dir("/tmp/mod"), PathBuf::from("dist/License/tmp/mod"));
        assert_eq!(policy.artifact_dir("../../etc/x"), PathBuf::from("dist/License/etc/x"));
        assert_eq!(policy.override_file("/abs/w"), PathBuf::from("overrides/abs/w/LICENSE"));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let mut policy = test_policy();
        assert!(policy.validate().is_ok());

        policy.deny.patterns.push("[".to_string());
        assert!(policy.validate().is_err());
    }
}
