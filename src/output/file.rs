use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use super::Output;
use crate::error::AuditError;
use crate::license::{License, LicenseDisplay, StatusType};
use crate::module::Module;
use crate::overrides::apply_override;
use crate::policy::Policy;

/// Output that materializes every allowed license to
/// `<exec dir>/License/<module path>/LICENSE`.
///
/// The first failure (missing policy, denied or unknown license, missing text,
/// I/O error) is returned to the caller and latched: the exit code becomes 1
/// and later `finish` calls are refused with [`AuditError::Halted`].
pub struct FileOutput {
    /// Policy used to classify licenses and look up overrides.
    policy: Option<Policy>,

    /// Full module list, optional. When given up front, padded output is aligned.
    modules: Vec<Module>,

    initialized: AtomicBool,
    state: Mutex<SinkState>,
}

#[derive(Debug, Default)]
struct SinkState {
    module_max: usize,
    exit_code: i32,
    failed: bool,
    closed: bool,
    artifacts: Vec<PathBuf>,
    #[cfg(test)]
    init_runs: usize,
}

impl FileOutput {
    pub fn new(policy: Option<Policy>, modules: Vec<Module>) -> Self {
        Self {
            policy,
            modules,
            initialized: AtomicBool::new(false),
            state: Mutex::new(SinkState::default()),
        }
    }

    /// Artifacts written so far, in completion order
    pub fn artifacts(&self) -> Vec<PathBuf> {
        self.lock_state().artifacts.clone()
    }

    /// Module path padded to the longest path of the known module set
    pub fn padded_module(&self, module: &Module) -> String {
        self.ensure_init();
        let width = self.lock_state().module_max;
        if width == 0 {
            return module.path.clone();
        }
        format!("{:<width$}", module.path, width = width)
    }

    fn lock_state(&self) -> MutexGuard<'_, SinkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_init(&self) {
        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        let mut state = self.lock_state();
        if self.initialized.load(Ordering::Acquire) {
            return;
        }

        state.module_max = self.modules.iter().map(|m| m.path.len()).max().unwrap_or(0);
        #[cfg(test)]
        {
            state.init_runs += 1;
        }
        self.initialized.store(true, Ordering::Release);
    }

    fn check_open(&self) -> Result<(), AuditError> {
        if self.lock_state().closed {
            return Err(AuditError::Closed);
        }
        Ok(())
    }

    fn materialize(
        &self,
        module: &Module,
        license: Option<License>,
        resolution_err: Option<&anyhow::Error>,
    ) -> Result<PathBuf, AuditError> {
        let policy = self.policy.as_ref().ok_or(AuditError::MissingPolicy)?;

        if let Some(err) = resolution_err {
            warn!(module = %module, "License resolution failed: {:#}", err);
        }

        let state = policy.classify(license.as_ref());
        let mut license = match license {
            Some(license) if !state.is_failure() => license,
            license => {
                return Err(AuditError::PolicyViolation {
                    module: module.to_string(),
                    license: LicenseDisplay(license.as_ref()).to_string(),
                    state,
                })
            }
        };

        apply_override(&module.path, policy, &mut license);

        if license.text.is_empty() {
            return Err(AuditError::MissingLicense {
                module: module.to_string(),
                license: license.to_string(),
            });
        }

        let dir = policy.artifact_dir(&module.path);
        fs::create_dir_all(&dir).map_err(|source| AuditError::Materialize {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join("LICENSE");
        fs::write(&path, license.text.as_bytes()).map_err(|source| AuditError::Materialize {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

impl Output for FileOutput {
    fn start(&self, _module: &Module) -> Result<(), AuditError> {
        self.ensure_init();
        self.check_open()
    }

    fn update(&self, module: &Module, status: StatusType, message: &str) -> Result<(), AuditError> {
        self.ensure_init();
        self.check_open()?;
        debug!(module = %module, ?status, "{}", message);
        Ok(())
    }

    fn finish(
        &self,
        module: &Module,
        license: Option<License>,
        resolution_err: Option<&anyhow::Error>,
    ) -> Result<(), AuditError> {
        self.ensure_init();
        {
            let state = self.lock_state();
            if state.closed {
                return Err(AuditError::Closed);
            }
            if state.failed {
                return Err(AuditError::Halted {
                    module: module.to_string(),
                });
            }
        }

        match self.materialize(module, license, resolution_err) {
            Ok(path) => {
                info!("{} -> {}", self.padded_module(module), path.display());
                self.lock_state().artifacts.push(path);
                Ok(())
            }
            Err(err) => {
                let mut state = self.lock_state();
                state.failed = true;
                state.exit_code = 1;
                Err(err)
            }
        }
    }

    fn close(&self) -> Result<(), AuditError> {
        let mut state = self.lock_state();
        state.closed = true;
        Ok(())
    }

    fn exit_code(&self) -> i32 {
        self.lock_state().exit_code
    }
}
