pub mod classify;
pub mod csv_io;
pub mod prepare;
pub mod tables;

use std::path::Path;

use itertools::Itertools;
use thiserror::Error;

use crate::model::structures::fight_record::FightRecord;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("{path} is not a valid CSV table: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error
    },
    #[error("{path} is missing required column {column}")]
    MissingColumn { path: String, column: String },
    #[error("{path}: bad record at line {line}: {source}")]
    BadRecord {
        path: String,
        line: u64,
        #[source]
        source: csv::Error
    }
}

/// Loads a classified fight table as the engine's ledger, restoring the
/// chronological order the engine requires: ascending `(date, event, bout)`,
/// stable so equal keys keep their file order.
pub fn read_ledger(path: &Path) -> Result<Vec<FightRecord>, IngestError> {
    let mut ledger: Vec<FightRecord> = csv_io::read_rows(path)?;

    ledger = ledger
        .into_iter()
        .sorted_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.event.cmp(&b.event))
                .then_with(|| a.bout.cmp(&b.bout))
        })
        .collect();

    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::{
        ingest::{csv_io, read_ledger},
        model::structures::outcome::Outcome,
        utils::test_utils::generate_fight
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 6, day).unwrap()
    }

    #[test]
    fn test_read_ledger_restores_chronological_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fights_classified.csv");
        let fights = vec![
            generate_fight(date(20), "c", "d", Outcome::B, 1.0),
            generate_fight(date(5), "a", "b", Outcome::A, 1.2),
        ];
        csv_io::write_rows_atomic(&path, &fights).unwrap();

        let ledger = read_ledger(&path).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].date, date(5));
        assert_eq!(ledger[1].date, date(20));
    }

    #[test]
    fn test_read_ledger_round_trips_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fights_classified.csv");
        let mut fight = generate_fight(date(1), "a", "b", Outcome::Draw, 1.1);
        fight.weight_class = "Lightweight".to_string();
        fight.referee = "Herb Dean".to_string();
        csv_io::write_rows_atomic(&path, std::slice::from_ref(&fight)).unwrap();

        let ledger = read_ledger(&path).unwrap();

        assert_eq!(ledger, vec![fight]);
    }
}
