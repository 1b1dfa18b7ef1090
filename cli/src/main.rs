//! Command-line frontend for the oscillator search.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

mod commands;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;
    debug!("Starting lifeosc v{} ...", env!("CARGO_PKG_VERSION"));
    commands::run(cli)
}

fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init()?;
    Ok(())
}
