use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::ingest::{csv_io, IngestError};

/// One row of the raw event details table. Only the name and date matter;
/// everything else the scrape carries is ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct EventRow {
    #[serde(rename = "EVENT")]
    pub event: String,
    #[serde(rename = "DATE")]
    pub date: String
}

/// One row of the raw fight results table, the driver of the unified ledger.
#[derive(Deserialize, Debug, Clone)]
pub struct ResultRow {
    #[serde(rename = "EVENT")]
    pub event: String,
    #[serde(rename = "BOUT")]
    pub bout: String,
    #[serde(rename = "OUTCOME")]
    pub outcome: String,
    #[serde(rename = "WEIGHTCLASS")]
    pub weight_class: String,
    #[serde(rename = "METHOD")]
    pub method: String,
    #[serde(rename = "ROUND")]
    pub round: String,
    #[serde(rename = "TIME", default)]
    pub time: String,
    #[serde(rename = "TIME FORMAT")]
    pub time_format: String,
    #[serde(rename = "REFEREE")]
    pub referee: String,
    #[serde(rename = "DETAILS")]
    pub details: String,
    #[serde(rename = "URL")]
    pub url: String
}

/// One row of the optional fighter roster table, mapping display names to
/// stable profile URLs.
#[derive(Deserialize, Debug, Clone)]
pub struct FighterRow {
    #[serde(rename = "FIGHTER")]
    pub fighter: String,
    #[serde(rename = "URL")]
    pub url: String
}

pub fn read_events(path: &Path) -> Result<Vec<EventRow>, IngestError> {
    csv_io::read_rows_with_columns(path, &["EVENT", "DATE"])
}

pub fn read_results(path: &Path) -> Result<Vec<ResultRow>, IngestError> {
    csv_io::read_rows_with_columns(path, &[
        "EVENT",
        "BOUT",
        "OUTCOME",
        "WEIGHTCLASS",
        "METHOD",
        "ROUND",
        "TIME FORMAT",
        "REFEREE",
        "DETAILS",
        "URL",
    ])
}

pub fn read_fighters(path: &Path) -> Result<Vec<FighterRow>, IngestError> {
    csv_io::read_rows_with_columns(path, &["FIGHTER", "URL"])
}

/// Parses the event date formats the scrapes actually contain: long-form
/// American dates and ISO dates. Anything else is treated as undated.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::ingest::{
        tables::{parse_event_date, read_events, read_results},
        IngestError
    };

    #[test]
    fn test_parse_event_date_formats() {
        let expected = NaiveDate::from_ymd_opt(1993, 11, 12).unwrap();

        assert_eq!(parse_event_date("November 12, 1993"), Some(expected));
        assert_eq!(parse_event_date("1993-11-12"), Some(expected));
        assert_eq!(parse_event_date("11/12/1993"), Some(expected));
        assert_eq!(parse_event_date(""), None);
        assert_eq!(parse_event_date("TBD"), None);
    }

    #[test]
    fn test_read_events_requires_date_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        std::fs::write(&path, "EVENT,LOCATION\nUFC 1,Denver\n").unwrap();

        let result = read_events(&path);

        assert!(matches!(result, Err(IngestError::MissingColumn { column, .. }) if column == "DATE"));
    }

    #[test]
    fn test_read_results_accepts_missing_time_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        std::fs::write(
            &path,
            "EVENT,BOUT,OUTCOME,WEIGHTCLASS,METHOD,ROUND,TIME FORMAT,REFEREE,DETAILS,URL\n\
             UFC 1,A vs. B,W/L,Open,KO,1,3 Rnd (5-5-5),Ref,,http://x\n"
        )
        .unwrap();

        let rows = read_results(&path).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].time, "");
        assert_eq!(rows[0].outcome, "W/L");
    }
}
