use clap::ArgMatches;
use tracing::error;

use hieragit_core::events;

mod config;
mod data;
pub mod helpers;
mod overrides;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let hiera = helpers::open_hiera(matches)?;

    match matches.subcommand() {
        Some(("config", _)) => config::handle_config_command(&hiera),
        Some(("hierarchy", _)) => config::handle_hierarchy_command(&hiera),
        Some(("backends", _)) => config::handle_backends_command(&hiera),
        Some(("backend", sub_matches)) => config::handle_backend_command(sub_matches, &hiera),
        Some(("get", sub_matches)) => data::handle_get_command(sub_matches, &hiera),
        Some(("set", sub_matches)) => data::handle_set_command(sub_matches, &hiera),
        Some(("overrides", sub_matches)) => {
            overrides::handle_overrides_command(sub_matches, &hiera)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
