//! This is the module handling the `verify` sub-command, a read-only
//! diagnostics pass over the JSON export.
//!
//! Reports every (club, location) still lacking coordinates and every club
//! still lacking a website, so the operator knows what to enrich by hand in
//! the ledger.
//!

use std::collections::BTreeSet;
use std::path::PathBuf;

use eyre::{eyre, Result};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use crate::cli::VerifyOpts;
use crate::config::Config;
use crate::export::load_competitions;
use crate::extract::LocationRecord;

/// Check the last export for missing enrichment data.
///
#[tracing::instrument(skip(cfg))]
pub fn verify_locations(cfg: &Config, vopts: &VerifyOpts) -> Result<()> {
    trace!("verify_locations");

    let path: PathBuf = vopts.file.clone().unwrap_or_else(|| cfg.json_path());
    if !path.exists() {
        return Err(eyre!("{} not found, run `fetch` first", path.display()));
    }

    let records = load_competitions(&path)?;
    let (missing_coords, missing_websites) = missing(&records);

    if missing_coords.is_empty() {
        eprintln!("All locations have coordinates.");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Club", "Location"]);
        missing_coords.iter().for_each(|(club, location)| {
            builder.push_record([club, location]);
        });
        let table = builder.build().with(Style::modern()).to_string();
        eprintln!("Locations with missing coordinates:\n{table}");
    }

    if missing_websites.is_empty() {
        eprintln!("\nAll clubs have websites.");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["Club"]);
        missing_websites.iter().for_each(|club| {
            builder.push_record([club]);
        });
        let table = builder.build().with(Style::modern()).to_string();
        eprintln!("\nClubs with missing websites (no regulation link found yet):\n{table}");
    }

    Ok(())
}

/// Split the records into what lacks coordinates and what lacks a website,
/// each de-duplicated and sorted.
///
fn missing(records: &[LocationRecord]) -> (BTreeSet<(String, String)>, BTreeSet<String>) {
    let mut coords = BTreeSet::new();
    let mut websites = BTreeSet::new();

    for record in records {
        if record.latitude.is_none() || record.longitude.is_none() {
            coords.insert((record.club.clone(), record.location.clone()));
        }
        if record.website.is_empty() {
            websites.insert(record.club.clone());
        }
    }
    (coords, websites)
}
