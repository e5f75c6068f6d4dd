//! Module describing all commands and options of the `zawodyctl` driver.
//!
//! Two main commands:
//!
//! - `fetch` runs the whole pipeline: GET the listing page, rebuild the
//!   club→location→competition hierarchy, rewrite the ledger, export JSON and
//!   emit one calendar per club.
//! - `verify` reads the JSON export back and reports what still needs manual
//!   enrichment (coordinates, websites).
//!
//! `completion` is here just to configure the various shells completion
//! system.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `fetch [-o DIR] [-Y YEAR]`
/// `verify [-f FILE]`
/// `version`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// Fetch the listing and regenerate every output file
    Fetch(FetchOpts),
    /// Report records lacking coordinates or websites
    Verify(VerifyOpts),
    /// Display the tool version
    Version,
}

// ------

/// Options for the full scrape run.
///
#[derive(Debug, Parser)]
pub struct FetchOpts {
    /// Output directory (overrides the configuration).
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Year assumed for dates without one (overrides the configuration).
    #[clap(short = 'Y', long)]
    pub year: Option<i32>,
}

/// Options for the diagnostics pass.
///
#[derive(Debug, Parser)]
pub struct VerifyOpts {
    /// JSON export to check (defaults to the configured one).
    #[clap(short = 'f', long)]
    pub file: Option<PathBuf>,
}

/// Options for shell completion generation.
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    /// Shell to generate completion for.
    #[clap(value_parser)]
    pub shell: Shell,
}
