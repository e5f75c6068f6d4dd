//! JSON export of the scraped records.
//!

use std::fs;
use std::path::Path;

use eyre::Result;
use tracing::info;

use crate::extract::LocationRecord;

/// Write the record list as pretty-printed JSON, non-ASCII preserved
/// literally.  Overwrites the previous run's file.
///
#[tracing::instrument(skip(records))]
pub fn save_competitions(path: &Path, records: &[&LocationRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Read back a previously exported file (used by `verify`).
///
pub fn load_competitions(path: &Path) -> Result<Vec<LocationRecord>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use crate::extract::Competition;

    use super::*;

    #[test]
    fn test_roundtrip_preserves_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("competitions.json");

        let record = LocationRecord {
            club: "KS GRUNWALD".to_string(),
            location: "Poznań ul. Lwowska 4".to_string(),
            latitude: Some(52.4064),
            longitude: None,
            website: String::new(),
            competitions: vec![Competition {
                date: Some("10 sty 2026".to_string()),
                name: Some("Puchar Wiosny — Śrem".to_string()),
                regulation_link: None,
                weapons: vec![],
            }],
        };

        save_competitions(&path, &[&record]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        // Non-ASCII stays literal, absent coordinates serialize as null and
        // absent competition fields are omitted entirely.
        assert!(raw.contains("Poznań"));
        assert!(raw.contains("Śrem"));
        assert!(raw.contains("\"longitude\": null"));
        assert!(!raw.contains("regulation_link"));

        let reloaded = load_competitions(&path).unwrap();
        assert_eq!(vec![record], reloaded);
    }

    #[test]
    fn test_export_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.json");
        let second = dir.path().join("b.json");

        let record = LocationRecord {
            club: "KS BELLONA".to_string(),
            location: "Kalisz".to_string(),
            latitude: None,
            longitude: None,
            website: "https://bellona.example.pl".to_string(),
            competitions: vec![],
        };

        save_competitions(&first, &[&record]).unwrap();
        save_competitions(&second, &[&record]).unwrap();
        assert_eq!(
            fs::read_to_string(&first).unwrap(),
            fs::read_to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_competitions(&dir.path().join("absent.json")).is_err());
    }
}
