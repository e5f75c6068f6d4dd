//! Module rebuilding the club → location → competition hierarchy out of the
//! portal's flat listing page.
//!
//! The page carries no structural grouping: month headers (`p.text-2xl`) and
//! competition entries (`div.sm:grid-cols-12`) are plain siblings addressed
//! only by CSS class.  We first cut the sibling list into explicit month
//! sections, then interpret each entry in two passes:
//!
//! 1. website inference — a club's website is only discoverable through a
//!    regulation link, which may sit on a *different* entry than the one that
//!    first establishes the club's location record, so inference has to be
//!    complete before assembly commits websites;
//! 2. record assembly — build one [`LocationRecord`] per (club, sanitized
//!    location) pair, seeded from the ledger, and accumulate competitions in
//!    encounter order.
//!
//! A malformed entry is skipped, never fatal.
//!

use std::collections::{BTreeMap, BTreeSet};

use eyre::Result;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::ledger::Ledger;
use crate::text::sanitize;

/// Visible anchor text marking a regulation ("Regulamin") link.
///
const REGULATION_TOKEN: &str = "Regulamin";

/// Identifies one output record: (club name, sanitized location text).
///
pub type LocationKey = (String, String);

/// One competition as listed on the portal.  The date is kept as raw text at
/// this layer; only the calendar emitter interprets it.
///
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Competition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regulation_link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weapons: Vec<String>,
}

impl Competition {
    /// An entry with nothing extracted is discarded, not recorded.
    ///
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.name.is_none()
            && self.regulation_link.is_none()
            && self.weapons.is_empty()
    }
}

/// One club+location with its accumulated competitions.  Coordinates come
/// from the ledger and may be absent pending manual enrichment; the website
/// is inferred from regulation links with the ledger as fallback.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LocationRecord {
    pub club: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

/// Custom error type for the extraction pass.
///
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector {0}: {1}")]
    BadSelector(String, String),
}

/// Compiled selectors for the fixed page layout.
///
struct Selectors {
    header: Selector,
    club: Selector,
    location: Selector,
    date: Selector,
    name: Selector,
    links: Selector,
    weapons: Selector,
    weapon_label: Selector,
}

impl Selectors {
    fn new() -> Result<Self, ExtractError> {
        let sel = |s: &str| {
            Selector::parse(s).map_err(|e| ExtractError::BadSelector(s.to_string(), e.to_string()))
        };
        Ok(Selectors {
            header: sel("p.text-2xl")?,
            club: sel("p.uppercase")?,
            location: sel("p.leading-4")?,
            date: sel("div.whitespace-nowrap")?,
            name: sel("strong.leading-4")?,
            links: sel("a[href]")?,
            weapons: sel("div.grid-cols-2")?,
            weapon_label: sel("p")?,
        })
    }
}

/// One month header and the competition entries listed under it.
///
struct MonthSection<'a> {
    month: String,
    entries: Vec<ElementRef<'a>>,
}

/// Parse the listing page and rebuild the record map.
///
/// Returns the map of records keyed by [`LocationKey`] plus the set of every
/// sanitized location text seen, which later sizes the rewritten ledger.
///
#[tracing::instrument(skip_all)]
pub fn parse_competitions(
    html: &str,
    ledger: &Ledger,
) -> Result<(BTreeMap<LocationKey, LocationRecord>, BTreeSet<String>)> {
    let doc = Html::parse_document(html);
    let sel = Selectors::new()?;

    let sections = month_sections(&doc, &sel);
    trace!("{} month sections", sections.len());

    // Pass 1: websites per club, first inference wins.
    //
    let mut club_websites: BTreeMap<String, String> = BTreeMap::new();
    for section in &sections {
        for entry in &section.entries {
            let Some(club) = club_name(entry, &sel) else {
                continue;
            };
            if let Some(href) = regulation_link(entry, &sel) {
                if let Some(website) = website_guess(&href) {
                    club_websites.entry(club).or_insert(website);
                }
            }
        }
    }

    // Pass 2: assemble the records.
    //
    let mut records: BTreeMap<LocationKey, LocationRecord> = BTreeMap::new();
    let mut all_locations = BTreeSet::new();

    for section in &sections {
        for entry in &section.entries {
            // Both the club and the location must be present, otherwise the
            // entry yields no record at all.
            //
            let Some(club) = club_name(entry, &sel) else {
                debug!(month = %section.month, "entry without club name, skipped");
                continue;
            };
            let Some(location) = entry
                .select(&sel.location)
                .next()
                .map(|p| p.text().collect::<String>().trim().to_string())
            else {
                debug!(month = %section.month, club = %club, "entry without location, skipped");
                continue;
            };

            let sanitized = sanitize(&location);
            all_locations.insert(sanitized.clone());

            let website = club_websites.get(&club).cloned().unwrap_or_default();
            let key = (club.clone(), sanitized.clone());

            let record = records.entry(key).or_insert_with(|| {
                let known = ledger.get(&sanitized);
                LocationRecord {
                    club: club.clone(),
                    location: location.clone(),
                    latitude: known.and_then(|k| k.latitude),
                    longitude: known.and_then(|k| k.longitude),
                    website: if website.is_empty() {
                        known.map(|k| k.website.clone()).unwrap_or_default()
                    } else {
                        website.clone()
                    },
                    competitions: vec![],
                }
            });

            // Backfill: the record may have been created from an entry that
            // had no regulation link.
            //
            if record.website.is_empty() && !website.is_empty() {
                record.website = website;
            }

            let competition = Competition {
                date: entry
                    .select(&sel.date)
                    .next()
                    .map(|d| d.text().collect::<String>().trim().to_string()),
                name: entry
                    .select(&sel.name)
                    .next()
                    .map(|s| s.text().collect::<String>().trim().to_string()),
                regulation_link: regulation_link(entry, &sel),
                weapons: entry
                    .select(&sel.weapons)
                    .next()
                    .map(|div| {
                        div.select(&sel.weapon_label)
                            .map(|p| p.text().collect::<String>().trim().to_string())
                            .collect()
                    })
                    .unwrap_or_default(),
            };

            if !competition.is_empty() {
                record.competitions.push(competition);
            }
        }
    }

    Ok((records, all_locations))
}

/// Cut the flat sibling list into explicit month sections.  A section runs
/// from one `p.text-2xl` header to the next header or the end of siblings.
///
fn month_sections<'a>(doc: &'a Html, sel: &Selectors) -> Vec<MonthSection<'a>> {
    let mut sections = vec![];
    for header in doc.select(&sel.header) {
        let month = header.text().collect::<String>().trim().to_string();
        let mut entries = vec![];
        for sibling in header.next_siblings().filter_map(ElementRef::wrap) {
            if sibling.value().name() == "p" && has_class(&sibling, "text-2xl") {
                break;
            }
            if has_class(&sibling, "sm:grid-cols-12") {
                entries.push(sibling);
            }
        }
        sections.push(MonthSection { month, entries });
    }
    sections
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// The club name is the first non-empty text node of the `p.uppercase`
/// element, ignoring any markup nested after it.
///
fn club_name(entry: &ElementRef, sel: &Selectors) -> Option<String> {
    let club_p = entry.select(&sel.club).next()?;
    club_p.children().find_map(|node| {
        node.value()
            .as_text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// First link whose visible text contains the regulation token.
///
fn regulation_link(entry: &ElementRef, sel: &Selectors) -> Option<String> {
    entry
        .select(&sel.links)
        .find(|a| a.text().collect::<String>().contains(REGULATION_TOKEN))
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Reduce a regulation link to its first three `/`-separated segments
/// (scheme + empty + host for an absolute URL) to guess the club's website.
///
fn website_guess(href: &str) -> Option<String> {
    let website = href.split('/').take(3).collect::<Vec<_>>().join("/");
    if website.is_empty() {
        None
    } else {
        Some(website)
    }
}
