//! End-to-end pipeline over a fixed page: extraction, JSON export, ledger
//! rewrite and calendar emission, run twice to check idempotence.

use std::fs;

use chrono::{TimeZone, Utc};

use zawodyctl::export::save_competitions;
use zawodyctl::extract::parse_competitions;
use zawodyctl::ics::write_calendars;
use zawodyctl::ledger::{load_ledger, save_ledger};

const PAGE: &str = r#"
<html><body><div>
  <p class="text-2xl">Styczeń</p>
  <div class="sm:grid-cols-12">
    <div class="whitespace-nowrap">10 sty 2026</div>
    <p class="uppercase">KS GRUNWALD</p>
    <p class="leading-4">Poznań, ul. Lwowska 4</p>
    <strong class="leading-4">Puchar Zimowy</strong>
    <div class="grid-cols-2"><p>Pistolet sportowy</p></div>
  </div>
  <div class="sm:grid-cols-12">
    <div class="whitespace-nowrap">pierwszy weekend lutego</div>
    <p class="uppercase">KS BELLONA</p>
    <p class="leading-4">Kalisz, strzelnica</p>
    <strong class="leading-4">Zawody Klubowe</strong>
    <a href="https://bellona.example.pl/pliki/regulamin.pdf">Regulamin</a>
  </div>
</div></body></html>
"#;

#[test]
fn test_pipeline_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("competitions.json");
    let csv = dir.path().join("locations.csv");
    let cals = dir.path().join("calendars");
    let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();

    // Seed a ledger with hand-entered coordinates for one location.
    fs::write(
        &csv,
        "location_text,latitude,longitude,website\n\
         Poznań ul. Lwowska 4,52.4064,16.9252,\n",
    )
    .unwrap();

    let mut outputs = vec![];
    for _ in 0..2 {
        let previous = load_ledger(&csv);
        let (records, all_locations) = parse_competitions(PAGE, &previous).unwrap();

        let list: Vec<_> = records.values().collect();
        save_competitions(&json, &list).unwrap();
        save_ledger(&csv, &all_locations, &previous, &records).unwrap();
        write_calendars(records.values(), &cals, 2026, now).unwrap();

        outputs.push((
            fs::read_to_string(&json).unwrap(),
            fs::read_to_string(&csv).unwrap(),
            fs::read_to_string(cals.join("ks_grunwald.ics")).unwrap(),
        ));
    }
    assert_eq!(outputs[0], outputs[1]);

    let (json_out, csv_out, grunwald_ics) = &outputs[1];

    // Hand-entered coordinates survive a run that found none.
    assert!(csv_out.contains("Poznań ul. Lwowska 4,52.4064,16.9252,"));
    // The inferred website made it into the ledger.
    assert!(csv_out.contains("Kalisz strzelnica,,,https://bellona.example.pl"));

    // The unparseable date stays in the JSON export untouched...
    assert!(json_out.contains("pierwszy weekend lutego"));
    // ...but produces no calendar event.
    let bellona_ics = fs::read_to_string(cals.join("ks_bellona.ics")).unwrap();
    assert_eq!(0, bellona_ics.matches("BEGIN:VEVENT").count());
    assert_eq!(1, grunwald_ics.matches("BEGIN:VEVENT").count());
}
