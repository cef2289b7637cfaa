use anyhow::Result;
use std::path::Path;
use tracing::error;

pub fn handle_config(config_path: Option<&Path>, show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        if !quiet {
            eprintln!("Use --show or --validate");
        }
        std::process::exit(1);
    }

    let config = match mod_license_auditor::config::load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration validation failed: {:#}", e);
            std::process::exit(1);
        }
    };

    if show && !quiet {
        println!("{}", serde_json::to_string_pretty(&config)?);
    }

    if validate {
        if config.policy.is_none() {
            error!("Configuration has no [policy] section");
            std::process::exit(1);
        }
        if !quiet {
            println!("✅ Configuration is valid");
        }
    }

    Ok(())
}
