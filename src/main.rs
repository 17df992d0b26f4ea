mod cli;
mod config;
mod convert;
mod logging;
mod plan_cmd;
mod transform_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Transform(args) => transform_cmd::run(args),
        Command::Plan(args) => plan_cmd::run(args),
    }
}
