pub mod config;
pub mod matcher;

// Re-export main types
pub use config::{LicenseRule, Policy};
pub use matcher::ClassificationState;
