use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("hieragit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect Hiera hierarchies and edit hieradata, optionally under git")
        .long_about("hieragit reads a Hiera config (:backends:, :hierarchy:, per-backend :datadir:), reads and writes data files, and reports which keys of a file are shadowed by higher-priority levels. With git storage every write is committed and pushed.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the Hiera config (overrides settings, default: hiera.yaml)")
                .global(true),
        )
        .arg(
            Arg::new("storage")
                .long("storage")
                .short('s')
                .help("Storage backend (overrides settings)")
                .value_parser(["local", "git"])
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("config").about("Print the loaded Hiera config as YAML"))
        .subcommand(
            Command::new("hierarchy").about("List hierarchy levels, highest priority first"),
        )
        .subcommand(Command::new("backends").about("List configured backends"))
        .subcommand(
            Command::new("backend")
                .about("Show one backend's options")
                .arg(
                    Arg::new("name")
                        .help("Backend name (e.g. yaml)")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("get")
                .about("Print a data file")
                .arg(
                    Arg::new("backend")
                        .help("Backend the file belongs to")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .help("File path relative to the backend's datadir (e.g. common.yaml)")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Create or overwrite a data file (commits and pushes with git storage)")
                .arg(
                    Arg::new("backend")
                        .help("Backend the file belongs to")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .help("File path relative to the backend's datadir")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .help("Read content from this file instead of stdin"),
                ),
        )
        .subcommand(
            Command::new("overrides")
                .about("Show keys of a data file that higher-priority levels override")
                .arg(
                    Arg::new("backend")
                        .help("Backend the file belongs to")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .help("File path relative to the backend's datadir")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}
