use std::io;

use clap::{crate_authors, crate_description, crate_version, CommandFactory, Parser};
use clap_complete::generate;
use eyre::Result;
use tracing::trace;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter::EnvFilter, fmt};

use zawodyctl::{fetch_competitions, verify_locations, Config, Opts, SubCommand};

/// Binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging.
    //
    let fmt = fmt::layer().with_target(false).compact();

    // Load filters from environment
    //
    let filter = EnvFilter::from_default_env();

    // Combine filter & specific format
    //
    tracing_subscriber::registry().with(filter).with(fmt).init();

    let cfg = Config::load(opts.config.as_deref())?;

    handle_subcmd(&cfg, &opts.subcmd)
}

pub fn handle_subcmd(cfg: &Config, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `fetch`
        //
        SubCommand::Fetch(fopts) => {
            trace!("fetch");

            fetch_competitions(cfg, fopts)?;
        }

        // Handle `verify`
        //
        SubCommand::Verify(vopts) => {
            trace!("verify");

            verify_locations(cfg, vopts)?;
        }

        // Standalone completion generation
        //
        // NOTE: you can generate UNIX shells completion on Windows and vice-versa.  Not worth
        //       trying to limit depending on the OS.
        //
        SubCommand::Completion(copts) => {
            let generator = copts.shell;
            generate(generator, &mut Opts::command(), NAME, &mut io::stdout());
        }

        // Standalone `version` command
        //
        SubCommand::Version => {
            eprintln!("{}/{} by {}", NAME, VERSION, AUTHORS);
            eprintln!("{}", crate_description!());
        }
    }
    Ok(())
}
