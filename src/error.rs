//! Fatal audit errors. Any of these stops the run.

use std::path::PathBuf;

use crate::policy::ClassificationState;

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("No policy configured, a policy is required to run the audit")]
    MissingPolicy,

    #[error("Denied or Unknown license: {module} -> ({license}) [{state}]")]
    PolicyViolation {
        module: String,
        license: String,
        state: ClassificationState,
    },

    #[error("Missing license: {module} -> ({license})")]
    MissingLicense { module: String, license: String },

    #[error("Failed to write license artifact {}: {source}", .path.display())]
    Materialize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Audit halted after an earlier failure, {module} was not processed")]
    Halted { module: String },

    #[error("Output already closed")]
    Closed,

    #[error("Failed to write audit report: {0}")]
    Report(#[source] std::io::Error),
}
