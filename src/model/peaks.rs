use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;

use crate::model::structures::{fight_audit::FightAudit, FighterId};

/// Highest rating a fighter ever held immediately after a bout.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PeakRecord {
    pub fighter_id: FighterId,
    pub fighter_name: String,
    pub peak_rating: f64,
    pub peak_date: chrono::NaiveDate,
    pub peak_event: String,
    pub peak_bout: String
}

/// # Peak Rating Projection
///
/// Pure projection over the audit history; it reads post-bout ratings and
/// never touches live state, so it can run equally well over an in-memory
/// history or one reloaded from disk.
///
/// # Rules
/// - Both sides of every audit entry count as one observation.
/// - A fighter's peak is their highest post-bout rating.
/// - Equal peaks resolve to the earliest date.
/// - Output is sorted by peak rating descending, fighter id ascending.
pub fn peak_ratings(audit_history: &[FightAudit]) -> Vec<PeakRecord> {
    let mut peaks: IndexMap<&str, PeakRecord> = IndexMap::new();

    let observations = audit_history.iter().flat_map(|audit| {
        [
            (
                audit.fighter_a_id.as_str(),
                audit.fighter_a_name.as_str(),
                audit.post_rating_a,
                audit
            ),
            (
                audit.fighter_b_id.as_str(),
                audit.fighter_b_name.as_str(),
                audit.post_rating_b,
                audit
            ),
        ]
    });

    for (fighter_id, fighter_name, post_rating, audit) in observations {
        match peaks.get_mut(fighter_id) {
            Some(peak) => {
                let higher = post_rating > peak.peak_rating;
                let earlier_tie = post_rating == peak.peak_rating && audit.date < peak.peak_date;
                if higher || earlier_tie {
                    *peak = observation_record(fighter_id, fighter_name, post_rating, audit);
                }
            }
            None => {
                peaks.insert(fighter_id, observation_record(fighter_id, fighter_name, post_rating, audit));
            }
        }
    }

    peaks
        .into_values()
        .sorted_by(|a, b| {
            b.peak_rating
                .partial_cmp(&a.peak_rating)
                .unwrap()
                .then_with(|| a.fighter_id.cmp(&b.fighter_id))
        })
        .collect()
}

fn observation_record(fighter_id: &str, fighter_name: &str, post_rating: f64, audit: &FightAudit) -> PeakRecord {
    PeakRecord {
        fighter_id: fighter_id.to_owned(),
        fighter_name: if fighter_name.is_empty() {
            fighter_id.to_owned()
        } else {
            fighter_name.to_owned()
        },
        peak_rating: post_rating,
        peak_date: audit.date,
        peak_event: audit.event.clone(),
        peak_bout: audit.bout.clone()
    }
}
