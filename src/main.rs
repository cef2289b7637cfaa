use anyhow::Result;
use std::io::IsTerminal;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{handle_check, handle_config};

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Check {
            modules,
            config,
            jobs,
            format,
            output,
        } => {
            handle_check(modules, config, jobs, format, output, cli.quiet)
        }
        Commands::Config { config, show, validate } => {
            handle_config(config.as_deref(), show, validate, cli.quiet)
        }
    }
}
