mod normalize;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use log::LevelFilter;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "svcanon";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Normalize structural-variant calls into canonical, uniquely identified intervals.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "Increase logging verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(normalize::cli::create_normalize_cli())
}

fn init_logging(matches: &ArgMatches) {
    let mut builder = env_logger::Builder::from_default_env();
    match matches.get_count("verbose") {
        0 => {
            // RUST_LOG wins when no -v is given
            if std::env::var_os("RUST_LOG").is_none() {
                builder.filter_level(LevelFilter::Info);
            }
        }
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).format_target(false).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        //
        // NORMALIZE
        //
        Some((normalize::cli::NORMALIZE_CMD, matches)) => {
            normalize::handlers::run_normalize(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
