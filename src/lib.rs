pub mod config;
pub mod driver;
pub mod error;
pub mod license;
pub mod manifest;
pub mod module;
pub mod output;
pub mod overrides;
pub mod policy;

// Re-export main types for easy access
pub use error::AuditError;
pub use license::{License, LicenseDisplay, StatusType};
pub use module::Module;
pub use output::{FileOutput, MultiOutput, Output, TableOutput};
pub use policy::{ClassificationState, LicenseRule, Policy};
