use std::io::Read;

use clap::ArgMatches;
use tracing::{error, info};

use hieragit_core::{Hiera, Storage, StorageBackend, events};

pub fn handle_get_command(
    matches: &ArgMatches,
    hiera: &Hiera<Storage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, file) = backend_and_file(matches)?;

    info!(event = "cli.get_started", backend = backend, file = file);

    match hiera.read_file(backend, file) {
        Ok(content) => {
            print!("{}", content);
            info!(event = "cli.get_completed", backend = backend, file = file);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to read '{}': {}", file, e);
            error!(event = "cli.get_failed", backend = backend, file = file, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub fn handle_set_command(
    matches: &ArgMatches,
    hiera: &Hiera<Storage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, file) = backend_and_file(matches)?;

    let content = match matches.get_one::<String>("input") {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read input '{}': {}", path, e))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    info!(
        event = "cli.set_started",
        backend = backend,
        file = file,
        bytes = content.len(),
        storage = hiera.storage().name()
    );

    match hiera.write_file(backend, file, &content) {
        Ok(()) => {
            println!("✅ Saved {} ({})", file, hiera.storage().name());
            info!(event = "cli.set_completed", backend = backend, file = file);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to save '{}': {}", file, e);
            error!(event = "cli.set_failed", backend = backend, file = file, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

pub(super) fn backend_and_file(
    matches: &ArgMatches,
) -> Result<(&str, &str), Box<dyn std::error::Error>> {
    let backend = matches
        .get_one::<String>("backend")
        .ok_or("Backend argument is required")?;
    let file = matches
        .get_one::<String>("file")
        .ok_or("File argument is required")?;
    Ok((backend.as_str(), file.as_str()))
}
