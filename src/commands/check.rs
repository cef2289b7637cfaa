use anyhow::Result;
use std::path::PathBuf;
use tracing::{error, info};
use crate::cli::OutputFormat;
use mod_license_auditor::config::load_config;
use mod_license_auditor::driver::audit;
use mod_license_auditor::manifest::{ManifestEntry, ManifestParser, DEFAULT_MANIFEST_FILE};
use mod_license_auditor::output::{FileOutput, MultiOutput, Output, ReportFormat, TableOutput};

pub fn handle_check(
    modules: Option<PathBuf>,
    config_path: Option<PathBuf>,
    jobs: Option<usize>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;

    let manifest_path = modules.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_FILE));
    let manifest = ManifestParser::parse_manifest(&manifest_path)?;
    let entries = ManifestParser::extract_entries(&manifest);

    // CLI arguments override config values
    let jobs = jobs.or(config.jobs).unwrap_or(1);
    let format = format.unwrap_or_else(|| {
        match config.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    });
    let report_format = match format {
        OutputFormat::Table => ReportFormat::Table,
        OutputFormat::Json => ReportFormat::Json,
    };

    let mut outputs: Vec<Box<dyn Output>> = Vec::new();
    if !quiet || output.is_some() {
        outputs.push(Box::new(TableOutput::new(config.policy.clone(), report_format, output)));
    }
    let known_modules = entries.iter().map(ManifestEntry::module).collect();
    outputs.push(Box::new(FileOutput::new(config.policy, known_modules)));
    let sink = MultiOutput::new(outputs);

    info!("Auditing {} modules with {} worker(s)", entries.len(), jobs);

    if let Err(err) = audit(&entries, &sink, jobs) {
        error!("{}", err);
        std::process::exit(sink.exit_code().max(1));
    }

    Ok(())
}
