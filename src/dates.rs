//! Module interpreting the free-text date column of the portal.
//!
//! The portal shows either a single day (`10 sty 2026`) or a day range within
//! one month (`27 - 28 lut 2026`).  Month names are the Polish three-letter
//! abbreviations.  The year may be missing, in which case the configured
//! fallback year applies.
//!

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Polish month abbreviations, in calendar order.
///
pub const MONTHS: [&str; 12] = [
    "sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru",
];

static RANGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d{1,2})\s*-\s*(\d{1,2})").unwrap());
static DAY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d{1,2})").unwrap());
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

/// Interpret a date expression as a half-open day range.
///
/// Returns `(start, end)` where `end` is the first day *after* the event, the
/// encoding used by all-day calendar entries.  The end of a `D1 - D2` range
/// is advanced with real calendar arithmetic so month and year boundaries
/// roll over correctly.
///
/// Returns `None` for anything unparseable (unknown month token, no day
/// number, out-of-range day); the caller is expected to skip the entry, not
/// abort.
///
pub fn parse_date_range(text: &str, fallback_year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let lower = text.to_lowercase();

    let month = MONTHS.iter().position(|m| lower.contains(m)).map(|i| i as u32 + 1)?;
    let year: i32 = YEAR_RE
        .captures(&lower)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(fallback_year);

    // Two-day range within the month?
    //
    if let Some(caps) = RANGE_RE.captures(&lower) {
        let d1: u32 = caps[1].parse().ok()?;
        let d2: u32 = caps[2].parse().ok()?;
        let start = NaiveDate::from_ymd_opt(year, month, d1)?;
        let end = NaiveDate::from_ymd_opt(year, month, d2)?.succ_opt()?;
        return Some((start, end));
    }

    // Otherwise a single leading day number.
    //
    let day: u32 = DAY_RE.captures(&lower)?[1].parse().ok()?;
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    Some((start, start.succ_opt()?))
}
