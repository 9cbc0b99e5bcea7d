use chrono::NaiveDate;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    ingest::prepare::UnifiedFight,
    model::{
        constants::{
            DOMINANT_CARD_COUNT, DOMINANT_CARD_MARGIN, DOMINANT_SINGLE_MARGIN, MULTIPLIER_DECISION,
            MULTIPLIER_DOMINANT_DECISION, MULTIPLIER_FINISH
        },
        elo_model::ConfigError,
        structures::{method_class::MethodClass, outcome::Outcome}
    }
};

lazy_static! {
    // "48 - 47" or "48–47", tolerating the en-dash some scorecards carry
    static ref SCORE_RE: Regex = Regex::new(r"(\d+)\s*[-–]\s*(\d+)").unwrap();
}

const FINISH_TOKENS: [&str; 8] = [
    "ko",
    "tko",
    "submission",
    "sub",
    "dq",
    "disqualification",
    "doctor stoppage",
    "retirement",
];

/// Method multipliers attached per method class, applied to the K-factor by
/// the rating engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MethodWeights {
    pub finish: f64,
    pub dominant: f64,
    pub decision: f64
}

impl Default for MethodWeights {
    fn default() -> Self {
        MethodWeights {
            finish: MULTIPLIER_FINISH,
            dominant: MULTIPLIER_DOMINANT_DECISION,
            decision: MULTIPLIER_DECISION
        }
    }
}

impl MethodWeights {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (class, value) in [
            ("finish", self.finish),
            ("dominant decision", self.dominant),
            ("decision", self.decision),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMultiplier {
                    class: class.to_string(),
                    value
                });
            }
        }

        Ok(())
    }

    fn for_class(&self, class: MethodClass) -> f64 {
        match class {
            MethodClass::Finish => self.finish,
            MethodClass::DecisionDominant => self.dominant,
            MethodClass::DecisionNormal | MethodClass::Draw | MethodClass::NoContest | MethodClass::Other => {
                self.decision
            }
        }
    }
}

/// Result of classifying one bout: the class, its multiplier, which rule
/// fired and any scorecard margins the rule consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub method_class: MethodClass,
    pub method_multiplier: f64,
    pub decision_basis: &'static str,
    pub judge_margins: String
}

/// One row of the classified fights table: the unified row plus the
/// classification columns. This is the table the rating engine reads its
/// ledger from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClassifiedFight {
    #[serde(rename = "DATE")]
    pub date: NaiveDate,
    #[serde(rename = "EVENT")]
    pub event: String,
    #[serde(rename = "BOUT")]
    pub bout: String,
    pub fighter_a_id: String,
    pub fighter_b_id: String,
    pub fighter_a_name: String,
    pub fighter_b_name: String,
    pub winner_label: Outcome,
    #[serde(rename = "WEIGHTCLASS")]
    pub weight_class: String,
    #[serde(rename = "METHOD")]
    pub method: String,
    pub decision_type: String,
    pub method_class: MethodClass,
    pub method_multiplier: f64,
    pub decision_basis: String,
    pub judge_margins: String,
    #[serde(rename = "ROUND")]
    pub round: String,
    #[serde(rename = "TIME", default)]
    pub time: String,
    #[serde(rename = "TIME FORMAT")]
    pub time_format: String,
    pub rounds_scheduled: u32,
    #[serde(rename = "REFEREE")]
    pub referee: String,
    #[serde(rename = "DETAILS")]
    pub details: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(default)]
    pub fighter_a_url: String,
    #[serde(default)]
    pub fighter_b_url: String
}

fn method_is_finish(method: &str) -> bool {
    let m = method.to_lowercase();
    FINISH_TOKENS.iter().any(|token| m.contains(token))
}

fn method_is_decision(method: &str) -> bool {
    method.to_lowercase().contains("decision")
}

/// Extracts judge totals from the DETAILS text and returns the absolute
/// margin per card, e.g. `"Bell 48 - 47. Lethaby 47 - 48."` -> `[1, 1]`.
pub fn parse_scorecard_margins(details: &str) -> Vec<u64> {
    SCORE_RE
        .captures_iter(&details.replace(',', " "))
        .filter_map(|c| {
            let a: u64 = c[1].parse().ok()?;
            let b: u64 = c[2].parse().ok()?;
            Some(a.abs_diff(b))
        })
        .collect()
}

/// # Method Classification
///
/// Decides how decisively a bout was won:
/// - Draws and no contests pass through at the decision weight.
/// - Finishes (KO/TKO/submission/DQ/stoppage/retirement) take the finish
///   weight.
/// - Split and majority decisions are always normal.
/// - Unanimous and generic decisions consult the scorecards: one card margin
///   of 3+ or two cards of 2+ makes the decision dominant; small margins make
///   it normal; without cards, unanimous is dominant and generic is normal.
/// - Anything else is `other` at the decision weight.
pub fn classify_method(
    winner_label: Outcome,
    method: &str,
    details: &str,
    weights: &MethodWeights
) -> Classification {
    let class_at = |method_class: MethodClass, decision_basis: &'static str, judge_margins: String| Classification {
        method_class,
        method_multiplier: weights.for_class(method_class),
        decision_basis,
        judge_margins
    };

    match winner_label {
        Outcome::Draw => return class_at(MethodClass::Draw, "outcome_draw", String::new()),
        Outcome::NoContest => return class_at(MethodClass::NoContest, "outcome_nc", String::new()),
        _ => {}
    }

    if method_is_finish(method) && !method_is_decision(method) {
        return class_at(MethodClass::Finish, "method_finish", String::new());
    }

    if method_is_decision(method) {
        let m = method.to_lowercase();
        if m.contains("split") {
            return class_at(MethodClass::DecisionNormal, "method_split", String::new());
        }
        if m.contains("majority") {
            return class_at(MethodClass::DecisionNormal, "method_majority", String::new());
        }

        let margins = parse_scorecard_margins(details);
        if !margins.is_empty() {
            let margins_str = margins.iter().join(",");
            if margins.iter().any(|&m| m >= DOMINANT_SINGLE_MARGIN) {
                return class_at(MethodClass::DecisionDominant, "details_any_margin_ge_3", margins_str);
            }
            if margins.iter().filter(|&&m| m >= DOMINANT_CARD_MARGIN).count() >= DOMINANT_CARD_COUNT {
                return class_at(MethodClass::DecisionDominant, "details_two_cards_ge_2", margins_str);
            }
            return class_at(MethodClass::DecisionNormal, "details_small_margins", margins_str);
        }

        if m.contains("unanimous") {
            return class_at(MethodClass::DecisionDominant, "method_unanimous_no_details", String::new());
        }
        return class_at(MethodClass::DecisionNormal, "method_generic_decision", String::new());
    }

    // Rare stoppages phrased oddly enough to dodge the decision check
    if method_is_finish(method) {
        return class_at(MethodClass::Finish, "method_finish_fallback", String::new());
    }

    class_at(MethodClass::Other, "unknown_method", String::new())
}

/// Classifies every unified fight, preserving input order.
pub fn classify_fights(fights: &[UnifiedFight], weights: &MethodWeights) -> Vec<ClassifiedFight> {
    fights
        .iter()
        .map(|fight| {
            let classification = classify_method(fight.winner_label, &fight.method, &fight.details, weights);

            ClassifiedFight {
                date: fight.date,
                event: fight.event.clone(),
                bout: fight.bout.clone(),
                fighter_a_id: fight.fighter_a_id.clone(),
                fighter_b_id: fight.fighter_b_id.clone(),
                fighter_a_name: fight.fighter_a_name.clone(),
                fighter_b_name: fight.fighter_b_name.clone(),
                winner_label: fight.winner_label,
                weight_class: fight.weight_class.clone(),
                method: fight.method.clone(),
                decision_type: fight.decision_type.clone(),
                method_class: classification.method_class,
                method_multiplier: classification.method_multiplier,
                decision_basis: classification.decision_basis.to_string(),
                judge_margins: classification.judge_margins,
                round: fight.round.clone(),
                time: fight.time.clone(),
                time_format: fight.time_format.clone(),
                rounds_scheduled: fight.rounds_scheduled,
                referee: fight.referee.clone(),
                details: fight.details.clone(),
                url: fight.url.clone(),
                fighter_a_url: fight.fighter_a_url.clone(),
                fighter_b_url: fight.fighter_b_url.clone()
            }
        })
        .collect()
}
