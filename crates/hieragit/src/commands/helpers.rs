use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, warn};

use hieragit_core::{Hiera, HieragitConfig, Storage, events, storage};

/// Load settings with warning on errors.
///
/// Falls back to defaults if loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub fn load_config_with_warning() -> HieragitConfig {
    match HieragitConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load settings: {}. Using defaults.\n\
                 Tip: Check ~/.hieragit/config.toml and ./.hieragit/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Settings load failed, using defaults"
            );
            HieragitConfig::default()
        }
    }
}

/// Apply `--config` and `--storage` on top of loaded settings.
pub fn apply_cli_overrides(config: &mut HieragitConfig, matches: &ArgMatches) {
    if let Some(path) = matches.get_one::<String>("config") {
        config.hiera.config = Some(PathBuf::from(path));
    }
    if let Some(kind) = matches.get_one::<String>("storage") {
        config.storage.kind = Some(kind.clone());
    }
}

/// Settings, then CLI flags, then the storage variant they select.
pub fn open_hiera(matches: &ArgMatches) -> Result<Hiera<Storage>, Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();
    apply_cli_overrides(&mut config, matches);

    let opened = config.validate().and_then(|()| storage::open(&config));
    match opened {
        Ok(storage) => Ok(Hiera::new(storage)),
        Err(e) => {
            eprintln!("❌ Invalid settings: {}", e);
            error!(event = "cli.storage.open_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
