use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

use crate::license::License;
use crate::policy::Policy;

/// Result of looking up an override license for one module.
#[derive(Debug)]
pub enum OverrideOutcome {
    /// No override declared for the module path
    NotDeclared,
    /// Override file read cleanly
    Replaced(String),
    /// Override file could not be read for a reason other than being absent
    ReadFailed { path: PathBuf, error: io::Error },
    /// Override declared but no file at the expected location
    NotFound { path: PathBuf },
}

/// Look up the override license text for `module_path`.
pub fn resolve_override(module_path: &str, policy: &Policy) -> OverrideOutcome {
    if policy.override_for(module_path).is_none() {
        return OverrideOutcome::NotDeclared;
    }

    let path = policy.override_file(module_path);
    match fs::read_to_string(&path) {
        Ok(text) => OverrideOutcome::Replaced(text),
        Err(error) if error.kind() == io::ErrorKind::NotFound => OverrideOutcome::NotFound { path },
        Err(error) => OverrideOutcome::ReadFailed { path, error },
    }
}

/// Apply any override to `license` in place. Failures are reported and the
/// detected text is kept. Returns true when the text was replaced.
pub fn apply_override(module_path: &str, policy: &Policy, license: &mut License) -> bool {
    match resolve_override(module_path, policy) {
        OverrideOutcome::NotDeclared => false,
        OverrideOutcome::Replaced(text) => {
            license.text = text;
            true
        }
        OverrideOutcome::ReadFailed { path, error } => {
            warn!(module = module_path, "Error reading override license from {}: {}", path.display(), error);
            false
        }
        OverrideOutcome::NotFound { path } => {
            warn!(module = module_path, "Nothing found for {}", path.display());
            false
        }
    }
}
