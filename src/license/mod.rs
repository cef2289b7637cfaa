use serde::{Deserialize, Serialize};
use std::fmt;

pub mod detector;

// Re-export from detector
pub use detector::{detect_license, identify_license, LICENSE_FILE_NAMES};

/// Placeholder rendered wherever a license could not be resolved.
pub const LICENSE_NOT_FOUND: &str = "<license not found or detected>";

/// A resolved software license.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// Human-friendly name like "MIT License"
    pub name: String,
    /// SPDX id, empty if unknown or unavailable
    #[serde(default)]
    pub spdx: String,
    /// Full license text
    #[serde(default)]
    pub text: String,
}

impl License {
    pub fn new(name: impl Into<String>, spdx: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spdx: spdx.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Display adapter for an optional license; `None` renders as [`LICENSE_NOT_FOUND`].
pub struct LicenseDisplay<'a>(pub Option<&'a License>);

impl fmt::Display for LicenseDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(license) => license.fmt(f),
            None => f.write_str(LICENSE_NOT_FOUND),
        }
    }
}

/// Severity of a progress notice sent through `Output::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusType {
    Unknown,
    Normal,
    Warning,
    Error,
}

pub fn normalize_license_name(license: &str) -> String {
    let license = license.trim();
    let license_lower = license.to_lowercase();

    if license.starts_with("Copyright") || license.len() < 3 {
        return "Unknown".to_string();
    }

    // Exact matches first (most common cases)
    match license {
        "MIT" | "MIT License" | "MIT license" | "Expat license" => return "MIT".to_string(),
        "Apache-2.0" | "Apache License 2.0" | "Apache License, Version 2.0" => return "Apache-2.0".to_string(),
        "BSD-3-Clause" | "BSD 3-Clause" | "BSD 3-Clause License" => return "BSD-3-Clause".to_string(),
        "BSD-2-Clause" | "BSD 2-Clause" | "BSD 2-Clause License" => return "BSD-2-Clause".to_string(),
        "MPL-2.0" | "Mozilla Public License 2.0" => return "MPL-2.0".to_string(),
        "ISC" | "ISC License" => return "ISC".to_string(),
        "GPL-2.0" | "GPLv2" => return "GPL-2.0".to_string(),
        "GPL-3.0" | "GPLv3" => return "GPL-3.0".to_string(),
        "LGPL-2.1" | "LGPLv2.1" => return "LGPL-2.1".to_string(),
        "LGPL-3.0" | "LGPLv3" => return "LGPL-3.0".to_string(),
        _ => {}
    }

    // LGPL before GPL, "lgpl" contains "gpl"
    if license_lower.contains("lgpl") || license_lower.contains("lesser general public") {
        if license_lower.contains('3') {
            return "LGPL-3.0".to_string();
        }
        if license_lower.contains('2') {
            return "LGPL-2.1".to_string();
        }
    }
    if license_lower.contains("gpl") || license_lower.contains("general public license") {
        if license_lower.contains('3') {
            return "GPL-3.0".to_string();
        }
        if license_lower.contains('2') {
            return "GPL-2.0".to_string();
        }
    }
    if license_lower.contains("apache") && license_lower.contains("2.0") {
        return "Apache-2.0".to_string();
    }
    if license_lower.contains("bsd") && license_lower.contains('3') {
        return "BSD-3-Clause".to_string();
    }
    if license_lower.contains("bsd") && license_lower.contains('2') {
        return "BSD-2-Clause".to_string();
    }
    if license_lower.contains("mozilla public license") || license_lower == "mpl-2.0" {
        return "MPL-2.0".to_string();
    }
    if license_lower == "isc license" || license_lower == "isc" {
        return "ISC".to_string();
    }
    if license_lower.contains("unlicense") {
        return "Unlicense".to_string();
    }
    if license_lower.contains("mit") {
        return "MIT".to_string();
    }

    // Return original if no normalization found
    license.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_display() {
        let license = License::new("MIT License", "MIT", "text");
        assert_eq!(license.to_string(), "MIT License");
        assert_eq!(LicenseDisplay(Some(&license)).to_string(), "MIT License");
        assert_eq!(LicenseDisplay(None).to_string(), LICENSE_NOT_FOUND);
    }

    #[test]
    fn test_normalize_license_name() {
        assert_eq!(normalize_license_name("MIT License"), "MIT");
        assert_eq!(normalize_license_name("Apache License, Version 2.0"), "Apache-2.0");
        assert_eq!(normalize_license_name("GNU Lesser General Public License v3"), "LGPL-3.0");
        assert_eq!(normalize_license_name("GNU General Public License v2"), "GPL-2.0");
        assert_eq!(normalize_license_name("Copyright 2020 someone"), "Unknown");
        assert_eq!(normalize_license_name("Proprietary"), "Proprietary");
    }
}
