use crate::model::structures::FighterId;
use chrono::NaiveDate;
use serde::Serialize;

/// Mutable rating state of a single fighter, updated after every rated bout.
///
/// Serializes directly as one row of the current ratings table.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FighterState {
    pub fighter_id: FighterId,
    pub fighter_name: String,
    pub rating: f64,
    pub fights: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate
}

impl FighterState {
    pub fn new(fighter_id: FighterId, fighter_name: String, rating: f64, date: NaiveDate) -> FighterState {
        FighterState {
            fighter_id,
            fighter_name,
            rating,
            fights: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            first_date: date,
            last_date: date
        }
    }
}
