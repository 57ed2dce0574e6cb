use clap::ArgMatches;
use tracing::{error, info};

use hieragit_core::{Hiera, Overrides, Storage, events};

use super::data::backend_and_file;

pub fn handle_overrides_command(
    matches: &ArgMatches,
    hiera: &Hiera<Storage>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, file) = backend_and_file(matches)?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.overrides_started", backend = backend, file = file);

    let overrides = match hiera.overrides(backend, file) {
        Ok(overrides) => overrides,
        Err(e) => {
            eprintln!("❌ Failed to compute overrides for '{}': {}", file, e);
            error!(event = "cli.overrides_failed", backend = backend, file = file, error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&overrides)?);
    } else if overrides.is_empty() {
        println!("No overrides for {}.", file);
    } else {
        print!("{}", format_table(&overrides));
    }

    info!(
        event = "cli.overrides_completed",
        backend = backend,
        file = file,
        count = overrides.len()
    );
    Ok(())
}

/// One row per shadowed key: key, winning file, value as JSON.
fn format_table(overrides: &Overrides) -> String {
    let key_width = overrides
        .keys()
        .map(|k| k.len())
        .chain(std::iter::once("KEY".len()))
        .max()
        .unwrap_or(0);
    let file_width = overrides
        .values()
        .map(|e| e.defining_file.len())
        .chain(std::iter::once("FILE".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:<key_width$}  {:<file_width$}  VALUE\n",
        "KEY", "FILE"
    );
    for entry in overrides.values() {
        out.push_str(&format!(
            "{:<key_width$}  {:<file_width$}  {}\n",
            entry.key, entry.defining_file, entry.value
        ));
    }
    out
}
