use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Output;
use crate::error::AuditError;
use crate::license::{License, StatusType};
use crate::module::Module;
use crate::policy::{ClassificationState, Policy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
}

/// One audited module as it appears in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRow {
    pub module: String,
    pub version: String,
    pub license: Option<String>,
    pub spdx: Option<String>,
    pub state: ClassificationState,
    pub overridden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AuditSummary {
    pub total_modules: usize,
    pub allowed: usize,
    pub denied: usize,
    pub unknown: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub summary: AuditSummary,
    pub modules: Vec<ModuleRow>,
}

impl AuditReport {
    pub fn new(mut modules: Vec<ModuleRow>) -> Self {
        modules.sort_by(|a, b| a.module.cmp(&b.module));

        let count = |state: ClassificationState| modules.iter().filter(|row| row.state == state).count();
        let summary = AuditSummary {
            total_modules: modules.len(),
            allowed: count(ClassificationState::Allowed),
            denied: count(ClassificationState::Denied),
            unknown: count(ClassificationState::Unknown),
        };

        Self {
            generated_at: Utc::now(),
            summary,
            modules,
        }
    }
}

/// Output that collects one row per finished module and renders a report on close.
pub struct TableOutput {
    policy: Option<Policy>,
    format: ReportFormat,
    destination: Option<PathBuf>,
    rows: Mutex<Vec<ModuleRow>>,
}

impl TableOutput {
    /// `destination` of `None` prints to stdout
    pub fn new(policy: Option<Policy>, format: ReportFormat, destination: Option<PathBuf>) -> Self {
        Self {
            policy,
            format,
            destination,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn report(&self) -> AuditReport {
        AuditReport::new(self.lock_rows().clone())
    }

    pub fn render(&self) -> Result<String, AuditError> {
        let report = self.report();
        match self.format {
            ReportFormat::Table => Ok(format_table_output(&report)),
            ReportFormat::Json => serde_json::to_string_pretty(&report)
                .map_err(|e| AuditError::Report(std::io::Error::other(e))),
        }
    }

    fn lock_rows(&self) -> MutexGuard<'_, Vec<ModuleRow>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Output for TableOutput {
    fn start(&self, _module: &Module) -> Result<(), AuditError> {
        Ok(())
    }

    fn update(&self, _module: &Module, _status: StatusType, _message: &str) -> Result<(), AuditError> {
        Ok(())
    }

    fn finish(
        &self,
        module: &Module,
        license: Option<License>,
        resolution_err: Option<&anyhow::Error>,
    ) -> Result<(), AuditError> {
        let state = match &self.policy {
            Some(policy) => policy.classify(license.as_ref()),
            None => ClassificationState::Unknown,
        };
        let overridden = self
            .policy
            .as_ref()
            .is_some_and(|policy| policy.override_for(&module.path).is_some());

        let row = ModuleRow {
            module: module.path.clone(),
            version: module.version.clone(),
            license: license.as_ref().map(|l| l.name.clone()),
            spdx: license.as_ref().map(|l| l.spdx.clone()).filter(|s| !s.is_empty()),
            state,
            overridden,
            error: resolution_err.map(|e| format!("{:#}", e)),
        };
        self.lock_rows().push(row);
        Ok(())
    }

    fn close(&self) -> Result<(), AuditError> {
        let content = self.render()?;
        match &self.destination {
            Some(path) => fs::write(path, content).map_err(AuditError::Report)?,
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", content).map_err(AuditError::Report)?;
            }
        }
        Ok(())
    }

    fn exit_code(&self) -> i32 {
        0
    }
}

pub fn format_table_output(report: &AuditReport) -> String {
    let mut output = String::new();

    let summary = &report.summary;
    output.push_str(&format!("📦 License Audit ({} modules)\n", summary.total_modules));
    output.push_str(&format!("✅ {} allowed  🚫 {} denied  ⚠️ {} unknown\n\n",
                             summary.allowed, summary.denied, summary.unknown));

    output.push_str(&format_module_table(&report.modules));
    output
}

fn format_module_table(rows: &[ModuleRow]) -> String {
    if rows.is_empty() {
        return "No modules audited.\n".to_string();
    }

    let module_width = rows.iter().map(|r| r.module.chars().count()).max().unwrap_or(0).max("Module".len());
    let license_width = 13;
    let status_width = 9;

    let border = |left: &str, mid: &str, right: &str| {
        format!("{}{}{}{}{}{}{}\n",
                left, "─".repeat(module_width + 2),
                mid, "─".repeat(license_width + 2),
                mid, "─".repeat(status_width + 2),
                right)
    };

    let mut output = String::new();

    // Table header
    output.push_str(&border("┌", "┬", "┐"));
    output.push_str(&format!("│ {:<mw$} │ {:<lw$} │ {:<sw$} │\n", "Module", "License", "Status",
                             mw = module_width, lw = license_width, sw = status_width));
    output.push_str(&border("├", "┼", "┤"));

    // Table rows
    for row in rows {
        let license = row.spdx.as_deref().or(row.license.as_deref()).unwrap_or("(unknown)");
        let license = truncate(license, license_width);
        let status = match row.state {
            ClassificationState::Allowed if row.overridden => "override",
            ClassificationState::Allowed => "allowed",
            ClassificationState::Denied => "denied",
            ClassificationState::Unknown => "unknown",
        };
        output.push_str(&format!("│ {:<mw$} │ {:<lw$} │ {:<sw$} │\n", row.module, license, status,
                                 mw = module_width, lw = license_width, sw = status_width));
    }

    // Table footer
    output.push_str(&border("└", "┴", "┘"));

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 1).collect();
        format!("{}…", head)
    }
}
