//! Drives every manifest module through the output lifecycle.

use rayon::prelude::*;
use tracing::warn;

use crate::error::AuditError;
use crate::license::{detect_license, License, StatusType};
use crate::manifest::ManifestEntry;
use crate::output::Output;

/// Resolve the license of one manifest entry.
///
/// A declared license without a readable license file still yields a `License`
/// with empty text, so an override can supply the text later.
pub fn resolve_license(entry: &ManifestEntry) -> (Option<License>, Option<anyhow::Error>) {
    let declared = || {
        entry.license.as_deref().or(entry.spdx.as_deref()).map(|name| License {
            name: name.to_string(),
            spdx: entry.spdx.clone().unwrap_or_default(),
            text: String::new(),
        })
    };

    let dir = match &entry.dir {
        Some(dir) => dir,
        None => {
            let err = anyhow::anyhow!("No source directory for module {}", entry.path);
            return (declared(), Some(err));
        }
    };

    match detect_license(dir, entry.license.as_deref(), entry.spdx.as_deref()) {
        Ok(Some(license)) => (Some(license), None),
        Ok(None) => {
            let err = anyhow::anyhow!("No license file found in {}", dir.display());
            (declared(), Some(err))
        }
        Err(err) => (declared(), Some(err)),
    }
}

fn process_module(entry: &ManifestEntry, output: &dyn Output) -> Result<(), AuditError> {
    let module = entry.module();
    output.start(&module)?;
    output.update(&module, StatusType::Normal, "resolving license")?;

    let (license, err) = resolve_license(entry);
    if let Some(err) = &err {
        output.update(&module, StatusType::Warning, &format!("{:#}", err))?;
    }

    output.finish(&module, license, err.as_ref())
}

/// Audit all entries, stopping at the first fatal error. `close` is always
/// called; the first error wins.
pub fn audit(entries: &[ManifestEntry], output: &dyn Output, jobs: usize) -> Result<(), AuditError> {
    let result = if jobs > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool.install(|| {
                entries
                    .par_iter()
                    .try_for_each(|entry| process_module(entry, output))
            }),
            Err(err) => {
                warn!("Failed to start worker pool, auditing sequentially: {}", err);
                audit_sequential(entries, output)
            }
        }
    } else {
        audit_sequential(entries, output)
    };

    let closed = output.close();
    result.and(closed)
}

fn audit_sequential(entries: &[ManifestEntry], output: &dyn Output) -> Result<(), AuditError> {
    entries.iter().try_for_each(|entry| process_module(entry, output))
}
