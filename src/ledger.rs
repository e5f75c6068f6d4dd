//! The location ledger, a CSV lookup table enriched by hand over time.
//!
//! Each row maps a sanitized location text to geocoordinates and a website.
//! The file is read at the start of a run and rewritten in full at the end,
//! one row per location observed this run, so coordinates entered manually
//! survive every rescrape.
//!

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use eyre::Result;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::extract::{LocationKey, LocationRecord};
use crate::text::sanitize;

/// Known data for one location.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerEntry {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub website: String,
}

/// Sanitized location text → known data.
///
pub type Ledger = BTreeMap<String, LedgerEntry>;

/// On-disk row shape.  Numeric fields are read as text because a blank or a
/// literal `None` (a leftover from hand editing) both mean "unknown".
///
#[derive(Debug, Deserialize)]
struct Row {
    location_text: String,
    latitude: String,
    longitude: String,
    #[serde(default)]
    website: String,
}

/// CSV header, fixed.
///
const HEADER: [&str; 4] = ["location_text", "latitude", "longitude", "website"];

/// Load the ledger.  A missing file yields an empty ledger; a malformed row
/// is warned about and skipped, never fatal.
///
#[tracing::instrument]
pub fn load_ledger(path: &Path) -> Ledger {
    let mut ledger = Ledger::new();

    if !path.exists() {
        debug!("no ledger at {}, starting empty", path.display());
        return ledger;
    }

    let mut rdr = match csv::Reader::from_path(path) {
        Ok(rdr) => rdr,
        Err(e) => {
            warn!("can not read {}: {e}", path.display());
            return ledger;
        }
    };

    for row in rdr.deserialize::<Row>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("skipping malformed ledger row: {e}");
                continue;
            }
        };
        let (latitude, longitude) = match (coord(&row.latitude), coord(&row.longitude)) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                warn!("skipping ledger row for {}: bad coordinates", row.location_text);
                continue;
            }
        };
        ledger.insert(
            row.location_text,
            LedgerEntry {
                latitude,
                longitude,
                website: row.website,
            },
        );
    }
    ledger
}

/// Parse a coordinate field.  Blank or `None` mean absent.
///
fn coord(field: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let field = field.trim();
    if field.is_empty() || field == "None" {
        return Ok(None);
    }
    field.parse().map(Some)
}

/// Rewrite the ledger with one row per location observed this run, sorted by
/// location text.  Known coordinates carry over untouched; the website column
/// takes the first record with a matching location and a non-empty website,
/// falling back to the previous ledger value.
///
#[tracing::instrument(skip_all)]
pub fn save_ledger(
    path: &Path,
    all_locations: &BTreeSet<String>,
    previous: &Ledger,
    records: &BTreeMap<LocationKey, LocationRecord>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;

    for location in all_locations {
        let known = previous.get(location);
        let website = records
            .values()
            .find(|r| sanitize(&r.location) == *location && !r.website.is_empty())
            .map(|r| r.website.clone())
            .or_else(|| known.map(|k| k.website.clone()))
            .unwrap_or_default();

        let latitude = opt_coord(known.and_then(|k| k.latitude));
        let longitude = opt_coord(known.and_then(|k| k.longitude));
        wtr.write_record([
            location.as_str(),
            latitude.as_str(),
            longitude.as_str(),
            website.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn opt_coord(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
