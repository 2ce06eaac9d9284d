mod cli;

use clap::Parser;
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // RUST_LOG takes precedence over -v
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    cli::exec(args.subcommand)
}
