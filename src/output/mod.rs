use crate::error::AuditError;
use crate::license::{License, StatusType};
use crate::module::Module;

pub mod file;
pub mod multi;
pub mod table;

pub use file::FileOutput;
pub use multi::MultiOutput;
pub use table::{AuditReport, ModuleRow, ReportFormat, TableOutput};

/// Receiver of per-module audit events.
///
/// A driver calls `start`, any number of `update`s and exactly one `finish`
/// for every module, then `close` once. Calls for different modules may
/// arrive concurrently from several workers.
pub trait Output: Send + Sync {
    fn start(&self, module: &Module) -> Result<(), AuditError>;

    fn update(&self, module: &Module, status: StatusType, message: &str) -> Result<(), AuditError>;

    /// Deliver the resolved license. Any error is fatal for the whole run.
    fn finish(
        &self,
        module: &Module,
        license: Option<License>,
        resolution_err: Option<&anyhow::Error>,
    ) -> Result<(), AuditError>;

    fn close(&self) -> Result<(), AuditError>;

    fn exit_code(&self) -> i32;
}
