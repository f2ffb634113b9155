//! Command-line entry point for `confapply`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use confapply::cli::{Cli, Command};
use confapply::logging::Logger;
use confapply::{commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let command = args.command.name();
    logging::init_subscriber(args.verbose, command);
    let log = Arc::new(Logger::new(command));

    match args.command {
        Command::Apply(opts) => commands::apply::run(&args.global, &opts, &log),
        Command::Resolve(opts) => commands::resolve::run(&args.global, &opts, &log),
        Command::Completions(opts) => commands::completions::run(&opts),
        Command::Version => {
            let version = option_env!("CONFAPPLY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("confapply {version}");
            Ok(())
        }
    }
}
