use crate::model::structures::{method_class::MethodClass, outcome::Outcome, FighterId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Full audit trail entry for one rated bout: both fighters' ratings before
/// and after, the expected and actual scores, and the effective K-factor.
///
/// One of these is appended per rated bout, in replay order. Skipped bouts
/// (no contest, unknown outcome) leave no entry. Column names match the
/// rating history table, so peak projection can rebuild its input from disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FightAudit {
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
    pub pre_rating_a: f64,
    pub pre_rating_b: f64,
    #[serde(rename = "p_A_win")]
    pub p_a_win: f64,
    pub score_a: f64,
    pub score_b: f64,
    pub winner_label: Outcome,
    pub method_class: MethodClass,
    pub method_multiplier: f64,
    #[serde(rename = "K_eff")]
    pub k_eff: f64,
    pub rounds_scheduled: u32,
    #[serde(rename = "WEIGHTCLASS", default)]
    pub weight_class: String,
    #[serde(rename = "METHOD", default)]
    pub method: String,
    #[serde(rename = "REFEREE", default)]
    pub referee: String,
    #[serde(rename = "URL", default)]
    pub url: String,
    pub post_rating_a: f64,
    pub post_rating_b: f64
}
