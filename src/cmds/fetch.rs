//! This is the module handling the `fetch` sub-command: the whole pipeline,
//! strictly in sequence.
//!
//! A transport failure aborts before any output file is touched; everything
//! downstream only absorbs local failures (bad ledger rows, malformed
//! entries, unparseable dates) and keeps going.
//!

use chrono::Utc;
use clap::{crate_name, crate_version};
use eyre::Result;
use reqwest::blocking::Client;
use tracing::{info, trace};

use crate::cli::FetchOpts;
use crate::config::Config;
use crate::extract::{parse_competitions, LocationRecord};
use crate::{export, ics, ledger};

/// Run one full scrape.
///
#[tracing::instrument(skip(cfg))]
pub fn fetch_competitions(cfg: &Config, fopts: &FetchOpts) -> Result<()> {
    trace!("fetch_competitions");

    // CLI flags override the configured output directory and fallback year.
    //
    let cfg = Config {
        output_dir: fopts.output.clone().unwrap_or_else(|| cfg.output_dir.clone()),
        fallback_year: fopts.year.unwrap_or(cfg.fallback_year),
        url: cfg.url.clone(),
        ledger_file: cfg.ledger_file.clone(),
        json_file: cfg.json_file.clone(),
        calendar_dir: cfg.calendar_dir.clone(),
    };

    let previous = ledger::load_ledger(&cfg.ledger_path());
    info!("{} known locations in the ledger", previous.len());

    // Fetch failure is the only fatal one, and it happens before any output
    // file is opened.
    //
    info!("Fetching {}", cfg.url);
    let html = fetch_page(&cfg.url)?;

    let (records, all_locations) = parse_competitions(&html, &previous)?;
    let list: Vec<&LocationRecord> = records.values().collect();

    export::save_competitions(&cfg.json_path(), &list)?;
    eprintln!(
        "Successfully scraped {} locations and saved to {}",
        list.len(),
        cfg.json_path().display()
    );

    ledger::save_ledger(&cfg.ledger_path(), &all_locations, &previous, &records)?;
    eprintln!(
        "{} updated with {} locations. Please fill in the missing coordinates.",
        cfg.ledger_path().display(),
        all_locations.len()
    );

    let written = ics::write_calendars(
        records.values(),
        &cfg.calendar_path(),
        cfg.fallback_year,
        Utc::now(),
    )?;
    eprintln!(
        "{} club calendars written under {}",
        written,
        cfg.calendar_path().display()
    );

    Ok(())
}

/// One GET, no retry.  Non-2xx statuses are errors too.
///
#[tracing::instrument]
fn fetch_page(url: &str) -> Result<String> {
    let client = Client::builder()
        .user_agent(format!("{}/{}", crate_name!(), crate_version!()))
        .build()?;
    let resp = client.get(url).send()?.error_for_status()?;
    Ok(resp.text()?)
}
