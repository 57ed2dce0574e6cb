use hieragit_core::init_logging;

mod app;
mod commands;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Quiet unless -v, so stdout stays pipeable
    let quiet = !matches.get_flag("verbose");
    init_logging(quiet);

    commands::run_command(&matches)?;

    Ok(())
}
