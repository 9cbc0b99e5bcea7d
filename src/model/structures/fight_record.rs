use crate::model::structures::{method_class::MethodClass, outcome::Outcome, FighterId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the fight ledger: a single bout, fully classified and ready
/// to be replayed by the rating engine.
///
/// Serialized column names follow the classified fight table, so a ledger
/// written by the classify stage deserializes straight into this struct.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FightRecord {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "EVENT")]
    pub event: String,
    #[serde(rename = "BOUT")]
    pub bout: String,
    pub fighter_a_id: FighterId,
    pub fighter_b_id: FighterId,
    pub fighter_a_name: String,
    pub fighter_b_name: String,
    pub winner_label: Outcome,
    pub method_class: MethodClass,
    pub method_multiplier: f64,
    pub rounds_scheduled: u32,
    #[serde(rename = "WEIGHTCLASS", default)]
    pub weight_class: String,
    #[serde(rename = "METHOD", default)]
    pub method: String,
    #[serde(rename = "REFEREE", default)]
    pub referee: String,
    #[serde(rename = "URL", default)]
    pub url: String
}
