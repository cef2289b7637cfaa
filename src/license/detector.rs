use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use super::{normalize_license_name, License};

/// License file names checked in a module source tree, in priority order.
pub const LICENSE_FILE_NAMES: &[&str] = &["LICENSE", "LICENSE.md", "LICENSE.txt", "LICENCE", "COPYING"];

/// Detect the license of a module from its source tree.
///
/// `declared_name` and `declared_spdx` come from the module manifest and win over
/// text identification. Returns `Ok(None)` when the directory holds no license file.
pub fn detect_license(
    module_dir: &Path,
    declared_name: Option<&str>,
    declared_spdx: Option<&str>,
) -> Result<Option<License>> {
    let license_path = match find_license_file(module_dir)? {
        Some(path) => path,
        None => return Ok(None),
    };

    let text = fs::read_to_string(&license_path)
        .with_context(|| format!("Failed to read {}", license_path.display()))?;

    let (name, spdx) = match (declared_name, declared_spdx) {
        (Some(name), Some(spdx)) => (name.to_string(), spdx.to_string()),
        (Some(name), None) => {
            let spdx = normalize_license_name(name);
            (name.to_string(), if spdx == name { String::new() } else { spdx })
        }
        (None, Some(spdx)) => (spdx.to_string(), spdx.to_string()),
        (None, None) => match identify_license(&text) {
            Some(spdx) => (spdx.to_string(), spdx.to_string()),
            None => ("Unknown".to_string(), String::new()),
        },
    };

    Ok(Some(License { name, spdx, text }))
}

fn find_license_file(module_dir: &Path) -> Result<Option<PathBuf>> {
    if !module_dir.is_dir() {
        anyhow::bail!("Module directory not found: {}", module_dir.display());
    }

    for name in LICENSE_FILE_NAMES {
        let candidate = module_dir.join(name);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

/// Identify the SPDX id of a license from its text by keyword matching.
///
/// Licenses that cite others by name (MPL-2.0 lists the GNU licenses as
/// secondary licenses) are checked before the licenses they cite.
pub fn identify_license(text: &str) -> Option<&'static str> {
    let lower = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

    if lower.contains("mozilla public license") && lower.contains("2.0") {
        return Some("MPL-2.0");
    }
    if lower.contains("apache license") && lower.contains("version 2.0") {
        return Some("Apache-2.0");
    }
    if lower.contains("gnu lesser general public license") {
        if lower.contains("version 3") {
            return Some("LGPL-3.0");
        }
        return Some("LGPL-2.1");
    }
    if lower.contains("gnu general public license") {
        if lower.contains("version 3") {
            return Some("GPL-3.0");
        }
        return Some("GPL-2.0");
    }
    if lower.contains("this is free and unencumbered software released into the public domain") {
        return Some("Unlicense");
    }
    if lower.contains("permission is hereby granted, free of charge") {
        return Some("MIT");
    }
    if lower.contains("permission to use, copy, modify, and/or distribute this software") {
        return Some("ISC");
    }
    if lower.contains("redistribution and use in source and binary forms") {
        if lower.contains("neither the name") || lower.contains("3.") {
            return Some("BSD-3-Clause");
        }
        return Some("BSD-2-Clause");
    }

    None
}
