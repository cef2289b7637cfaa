use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mod-license-auditor")]
#[command(about = "Audit module licenses against a policy and materialize license artifacts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run license audit on modules
    Check {
        /// Module manifest (default: modules.toml)
        #[arg(short, long)]
        modules: Option<PathBuf>,

        /// Policy config file (default: license-audit.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of parallel workers
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Report format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Report file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or validate configuration
    Config {
        /// Policy config file (default: license-audit.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
