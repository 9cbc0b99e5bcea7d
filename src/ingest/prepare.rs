use std::collections::HashMap;

use chrono::NaiveDate;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    ingest::tables::{parse_event_date, EventRow, FighterRow, ResultRow},
    model::{constants::DEFAULT_ROUNDS_SCHEDULED, structures::outcome::Outcome}
};

lazy_static! {
    static ref SPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref VERSUS_RE: Regex = Regex::new(r"(?i)\s+vs\.?\s+|\s+v\s+").unwrap();
    static ref ROUNDS_RE: Regex = Regex::new(r"(\d+)\s*Rnd").unwrap();
}

/// One row of the unified fights table: results joined with event dates,
/// bout labels split into fighters, outcomes normalized, identities resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnifiedFight {
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
    pub url: String,
    pub rounds_scheduled: u32,
    #[serde(default)]
    pub fighter_a_url: String,
    #[serde(default)]
    pub fighter_b_url: String
}

pub struct PrepareOutput {
    pub fights: Vec<UnifiedFight>,
    /// Result rows dropped because their event has no parseable date.
    pub dropped_undated: usize
}

pub fn normalize_text(raw: &str) -> String {
    SPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Lowercase comparison key used for event and fighter-name joins.
pub fn normalize_key(raw: &str) -> String {
    normalize_text(raw).to_lowercase()
}

/// Splits `"Name A vs. Name B"` into both names, tolerating `vs`, `v` and
/// collapsed spacing. A label that does not split cleanly becomes fighter A
/// whole, with fighter B left empty.
pub fn split_bout(bout: &str) -> (String, String) {
    let normalized = normalize_text(bout);
    let parts: Vec<&str> = VERSUS_RE.split(&normalized).collect();

    if parts.len() == 2 {
        (normalize_text(parts[0]), normalize_text(parts[1]))
    } else {
        (normalized, String::new())
    }
}

/// Maps raw OUTCOME strings to a winner label: `W/L` means A won, `L/W`
/// means B won, `D/D` is a draw, `NC` variants are no contests.
pub fn parse_outcome_label(outcome: &str) -> Outcome {
    let o = outcome.trim().to_uppercase().replace(' ', "");

    if o.contains("W/L") {
        Outcome::A
    } else if o.contains("L/W") {
        Outcome::B
    } else if o.contains("D/D") || o.contains("DRAW") {
        Outcome::Draw
    } else if o.contains("NC") || o.contains("N/C") {
        Outcome::NoContest
    } else {
        Outcome::Unknown
    }
}

/// Parses `"5 Rnd (5-5-5-5-5)"` style time formats into the scheduled round
/// count, defaulting to 3 when the field is absent or unreadable.
pub fn parse_rounds_scheduled(time_format: &str) -> u32 {
    ROUNDS_RE
        .captures(time_format)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(DEFAULT_ROUNDS_SCHEDULED)
}

/// Coarse decision categorization from the METHOD string; the classify stage
/// refines dominance later.
pub fn decision_type_from_method(method: &str) -> String {
    let m = method.to_lowercase();

    if !m.contains("decision") {
        "other"
    } else if m.contains("unanimous") {
        "unanimous"
    } else if m.contains("split") {
        "split"
    } else if m.contains("majority") {
        "majority"
    } else {
        "decision"
    }
    .to_string()
}

/// Builds the unified fights table: joins event dates onto results by
/// normalized event name, splits bout labels, normalizes outcomes and
/// resolves fighter identities (roster URL when known, name key otherwise).
/// Rows whose event has no parseable date are dropped and counted.
pub fn build_unified(
    events: &[EventRow],
    results: &[ResultRow],
    fighters: Option<&[FighterRow]>
) -> PrepareOutput {
    let event_dates: HashMap<String, Option<NaiveDate>> = events
        .iter()
        .map(|e| (normalize_key(&e.event), parse_event_date(&e.date)))
        .collect();

    let fighter_urls: HashMap<String, String> = fighters
        .unwrap_or_default()
        .iter()
        .filter(|f| !f.url.trim().is_empty())
        .map(|f| (normalize_key(&f.fighter), normalize_text(&f.url)))
        .collect();

    let mut dropped_undated = 0;
    let mut fights = Vec::with_capacity(results.len());

    for row in results {
        let date = match event_dates.get(&normalize_key(&row.event)).copied().flatten() {
            Some(date) => date,
            None => {
                warn!("Dropping {}: {} (event has no parseable date)", row.event, row.bout);
                dropped_undated += 1;
                continue;
            }
        };

        let (fighter_a_name, fighter_b_name) = split_bout(&row.bout);
        let fighter_a_url = fighter_urls.get(&normalize_key(&fighter_a_name)).cloned();
        let fighter_b_url = fighter_urls.get(&normalize_key(&fighter_b_name)).cloned();

        fights.push(UnifiedFight {
            date,
            event: normalize_text(&row.event),
            bout: normalize_text(&row.bout),
            fighter_a_id: fighter_a_url.clone().unwrap_or_else(|| normalize_key(&fighter_a_name)),
            fighter_b_id: fighter_b_url.clone().unwrap_or_else(|| normalize_key(&fighter_b_name)),
            fighter_a_name,
            fighter_b_name,
            winner_label: parse_outcome_label(&row.outcome),
            weight_class: normalize_text(&row.weight_class),
            method: normalize_text(&row.method),
            decision_type: decision_type_from_method(&row.method),
            round: normalize_text(&row.round),
            time: normalize_text(&row.time),
            time_format: normalize_text(&row.time_format),
            referee: normalize_text(&row.referee),
            details: normalize_text(&row.details),
            url: normalize_text(&row.url),
            rounds_scheduled: parse_rounds_scheduled(&row.time_format),
            fighter_a_url: fighter_a_url.unwrap_or_default(),
            fighter_b_url: fighter_b_url.unwrap_or_default()
        });
    }

    let fights = fights
        .into_iter()
        .sorted_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.event.cmp(&b.event))
                .then_with(|| a.bout.cmp(&b.bout))
        })
        .collect();

    PrepareOutput {
        fights,
        dropped_undated
    }
}
