//! Library part of `zawodyctl`.
//!
//! Fetches the WZSS competition listing and republishes it three ways: a
//! JSON feed of (club, location) records, a CSV ledger of locations awaiting
//! manual geocoordinate enrichment, and one iCalendar file per club.
//!
//! The interesting parts live in [`extract`] (rebuilding a hierarchy the
//! markup only implies), [`dates`] (Polish free-text date ranges) and
//! [`ics`] (calendar emission); everything else is plumbing around them.
//!

use clap::{crate_name, crate_version};

pub mod cli;
pub mod cmds;
pub mod config;
pub mod dates;
pub mod export;
pub mod extract;
pub mod ics;
pub mod ledger;
pub mod text;

pub use cli::*;
pub use cmds::*;
pub use config::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
