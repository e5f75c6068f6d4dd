//! Runtime configuration.
//!
//! Everything has a default so the tool runs with no configuration file at
//! all; an optional HCL file overrides individual values.
//!

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use eyre::Result;
use serde::Deserialize;
use tracing::debug;

/// Default portal page listing the current competitions.
///
const URL: &str = "https://portal.wzss.pl/competitions/current";
/// Ledger file name.
const LOCATIONS_CSV: &str = "locations.csv";
/// JSON export file name.
const COMPETITIONS_JSON: &str = "competitions.json";
/// Calendar subdirectory name.
const CALENDAR_DIR: &str = "calendars";

/// Configuration for the CLI tool.
///
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Competitions listing URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Base directory for every output file.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Ledger file name, relative to `output_dir`.
    #[serde(default = "default_ledger_file")]
    pub ledger_file: String,
    /// JSON export file name, relative to `output_dir`.
    #[serde(default = "default_json_file")]
    pub json_file: String,
    /// Calendar subdirectory, relative to `output_dir`.
    #[serde(default = "default_calendar_dir")]
    pub calendar_dir: String,
    /// Year assumed when a date expression carries none.
    #[serde(default = "default_fallback_year")]
    pub fallback_year: i32,
}

fn default_url() -> String {
    URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_ledger_file() -> String {
    LOCATIONS_CSV.to_string()
}

fn default_json_file() -> String {
    COMPETITIONS_JSON.to_string()
}

fn default_calendar_dir() -> String {
    CALENDAR_DIR.to_string()
}

fn default_fallback_year() -> i32 {
    Utc::now().year()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: default_url(),
            output_dir: default_output_dir(),
            ledger_file: default_ledger_file(),
            json_file: default_json_file(),
            calendar_dir: default_calendar_dir(),
            fallback_year: default_fallback_year(),
        }
    }
}

impl Config {
    /// Load the configuration, defaults when no file is given.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Config> {
        match fname {
            Some(fname) => {
                debug!("loading config from {}", fname.display());
                let data = fs::read_to_string(fname)?;
                Ok(hcl::from_str(&data)?)
            }
            None => Ok(Config::default()),
        }
    }

    /// Path of the ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.output_dir.join(&self.ledger_file)
    }

    /// Path of the JSON export.
    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_file)
    }

    /// Path of the calendar directory.
    pub fn calendar_path(&self) -> PathBuf {
        self.output_dir.join(&self.calendar_dir)
    }
}
