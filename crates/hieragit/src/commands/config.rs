use clap::ArgMatches;
use tracing::{error, info};

use hieragit_core::{Hiera, Storage, StorageBackend, events};

pub fn handle_config_command(hiera: &Hiera<Storage>) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        event = "cli.config_started",
        path = %hiera.storage().config_path().display()
    );

    let result = hiera.load_config().and_then(|config| config.to_yaml());
    match result {
        Ok(yaml) => {
            print!("{}", yaml);
            info!(event = "cli.config_completed");
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to load Hiera config: {}", e);
            error!(event = "cli.config_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn handle_hierarchy_command(hiera: &Hiera<Storage>) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.hierarchy_started");

    match hiera.hierarchy() {
        Ok(levels) => {
            for level in &levels {
                println!("{}", level);
            }
            info!(event = "cli.hierarchy_completed", count = levels.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to read hierarchy: {}", e);
            error!(event = "cli.hierarchy_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn handle_backends_command(hiera: &Hiera<Storage>) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.backends_started");

    match hiera.backends() {
        Ok(backends) => {
            for backend in &backends {
                println!("{}", backend);
            }
            info!(event = "cli.backends_completed", count = backends.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to read backends: {}", e);
            error!(event = "cli.backends_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn handle_backend_command(
    matches: &ArgMatches,
    hiera: &Hiera<Storage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches
        .get_one::<String>("name")
        .ok_or("Backend name is required")?;

    info!(event = "cli.backend_started", backend = name);

    match hiera.backend_options(name) {
        Ok(options) => {
            let base = hiera
                .storage()
                .config_path()
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            println!("datadir: {}", options.resolved_datadir(&base).display());
            if !options.extra.is_empty() {
                print!("{}", serde_yaml::to_string(&options.extra)?);
            }
            info!(event = "cli.backend_completed", backend = name);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to read backend '{}': {}", name, e);
            error!(event = "cli.backend_failed", backend = name, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
