//! Module emitting one iCalendar document per club.
//!
//! Every club gets a single calendar aggregating competitions from all of
//! its venues; each event still carries the venue of the record it came
//! from, so no location precision is lost.  Competitions whose date text the
//! interpreter rejects are left out of the calendar only, never out of the
//! JSON export.
//!

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use eyre::Result;
use tracing::{debug, info};

use crate::dates::parse_date_range;
use crate::extract::{Competition, LocationRecord};
use crate::text::slugify;

/// Product identifier, written in every calendar header and event UID.
///
pub const PRODID: &str = "-//zawodyctl//WZSS competitions//PL";

/// Event title when the portal entry carries no name.
///
const UNNAMED: &str = "Zawody";

/// Write one `.ics` file per club under `dir`, named by the club's slug.
/// Returns the number of files written.  `now` stamps every event of the
/// run identically.
///
#[tracing::instrument(skip(records))]
pub fn write_calendars<'a>(
    records: impl IntoIterator<Item = &'a LocationRecord>,
    dir: &Path,
    fallback_year: i32,
    now: DateTime<Utc>,
) -> Result<usize> {
    let mut by_club: BTreeMap<&str, Vec<&LocationRecord>> = BTreeMap::new();
    for record in records {
        by_club.entry(&record.club).or_default().push(record);
    }

    fs::create_dir_all(dir)?;
    let dtstamp = now.format("%Y%m%dT%H%M%SZ").to_string();

    for (club, club_records) in &by_club {
        let body = render_calendar(club, club_records, &dtstamp, fallback_year);
        let path = dir.join(format!("{}.ics", slugify(club)));
        fs::write(&path, body)?;
        info!("wrote {}", path.display());
    }
    Ok(by_club.len())
}

/// Render one club's calendar.  CRLF line endings throughout, as the format
/// mandates on the wire.
///
fn render_calendar(
    club: &str,
    records: &[&LocationRecord],
    dtstamp: &str,
    fallback_year: i32,
) -> String {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "X-PUBLISHED-TTL:PT1D".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&format!("Zawody {club}"))),
    ];

    for record in records {
        for competition in &record.competitions {
            let Some(date) = competition.date.as_deref() else {
                continue;
            };
            let Some((start, end)) = parse_date_range(date, fallback_year) else {
                debug!(club, date, "unparseable date, event skipped");
                continue;
            };

            let name = competition.name.as_deref().unwrap_or(UNNAMED);

            lines.push("BEGIN:VEVENT".to_string());
            lines.push(format!("DTSTART;VALUE=DATE:{}", start.format("%Y%m%d")));
            lines.push(format!("DTEND;VALUE=DATE:{}", end.format("%Y%m%d")));
            lines.push(format!("DTSTAMP:{dtstamp}"));
            lines.push(format!(
                "UID:{}-{}@zawodyctl",
                start.format("%Y%m%d"),
                slugify(name)
            ));
            lines.push(format!("SUMMARY:{}", escape_text(name)));

            let description = describe(competition);
            if !description.is_empty() {
                lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
            }
            lines.push(format!("LOCATION:{}", escape_text(&record.location)));
            lines.push("END:VEVENT".to_string());
        }
    }

    lines.push("END:VCALENDAR".to_string());
    let mut body = lines.join("\r\n");
    body.push_str("\r\n");
    body
}

/// Event description: the weapon list with whitespace runs collapsed, plus
/// the regulation link when there is one.
///
fn describe(competition: &Competition) -> String {
    let weapons = competition
        .weapons
        .iter()
        .map(|w| collapse_whitespace(w))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    match (weapons.is_empty(), &competition.regulation_link) {
        (true, Some(link)) => link.clone(),
        (false, Some(link)) => format!("{weapons} {link}"),
        (_, None) => weapons,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// RFC 5545 escaping for TEXT values.
///
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
