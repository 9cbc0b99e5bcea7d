use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::structures::{fight_record::FightRecord, method_class::MethodClass, outcome::Outcome};

/// Builds a minimal ledger row for the given matchup. Display names are the
/// uppercased ids; classification fields default to a normal decision.
pub fn generate_fight(
    date: NaiveDate,
    fighter_a_id: &str,
    fighter_b_id: &str,
    winner_label: Outcome,
    method_multiplier: f64
) -> FightRecord {
    FightRecord {
        date,
        event: format!("Event {}", date),
        bout: format!("{} vs. {}", fighter_a_id, fighter_b_id),
        fighter_a_id: fighter_a_id.to_string(),
        fighter_b_id: fighter_b_id.to_string(),
        fighter_a_name: fighter_a_id.to_uppercase(),
        fighter_b_name: fighter_b_id.to_uppercase(),
        winner_label,
        method_class: MethodClass::DecisionNormal,
        method_multiplier,
        rounds_scheduled: 3,
        weight_class: String::new(),
        method: String::new(),
        referee: String::new(),
        url: String::new()
    }
}

/// Generates a chronological ledger of `n_fights` rated bouts drawn from a
/// roster of `n_fighters`. Seeded RNG for reproducible results.
pub fn generate_ledger(n_fights: usize, n_fighters: usize) -> Vec<FightRecord> {
    assert!(n_fighters >= 2, "Roster must hold at least two fighters");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut date = NaiveDate::from_ymd_opt(2005, 1, 1).unwrap();
    let mut ledger = Vec::with_capacity(n_fights);

    for _ in 0..n_fights {
        let a = rng.random_range(0..n_fighters);
        let b = loop {
            let candidate = rng.random_range(0..n_fighters);
            if candidate != a {
                break candidate;
            }
        };

        let outcome = match rng.random_range(0..10) {
            0..=4 => Outcome::A,
            5..=8 => Outcome::B,
            _ => Outcome::Draw
        };
        let (method_class, method_multiplier) = match rng.random_range(0..3) {
            0 => (MethodClass::Finish, 1.2),
            1 => (MethodClass::DecisionDominant, 1.1),
            _ => (MethodClass::DecisionNormal, 1.0)
        };

        let mut fight = generate_fight(
            date,
            &format!("fighter-{}", a),
            &format!("fighter-{}", b),
            outcome,
            method_multiplier
        );
        fight.method_class = method_class;
        ledger.push(fight);

        date = date + Duration::days(rng.random_range(0..14));
    }

    ledger
}
