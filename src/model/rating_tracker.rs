use chrono::NaiveDate;
use indexmap::IndexMap;
use itertools::Itertools;

use crate::model::structures::{
    fight_record::FightRecord, fighter_state::FighterState, outcome::Outcome, FighterId
};

enum SideResult {
    Win,
    Loss,
    Draw
}

pub struct RatingTracker {
    // Ratings keyed by fighter id, kept in first-appearance order.
    // Snapshots re-sort by rating without disturbing this order.
    fighters: IndexMap<FighterId, FighterState>,
    base_rating: f64
}

impl RatingTracker {
    pub fn new(base_rating: f64) -> RatingTracker {
        RatingTracker {
            fighters: IndexMap::new(),
            base_rating
        }
    }

    /// Returns the fighter's current state, creating it at the base rating
    /// on first appearance. `date` becomes the debut date for new fighters.
    pub fn get_or_create(&mut self, fighter_id: &str, fighter_name: &str, date: NaiveDate) -> &FighterState {
        self.fighters.entry(fighter_id.to_owned()).or_insert_with(|| {
            FighterState::new(
                fighter_id.to_owned(),
                fighter_name.to_owned(),
                self.base_rating,
                date
            )
        })
    }

    pub fn get(&self, fighter_id: &str) -> Option<&FighterState> {
        self.fighters.get(fighter_id)
    }

    pub fn len(&self) -> usize {
        self.fighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fighters.is_empty()
    }

    /// Commits the result of one rated bout: both fighters receive their
    /// post-bout ratings, bout counters and activity dates in a single call,
    /// so no observer can see one side updated without the other.
    ///
    /// Unrated outcomes (no contest, unknown) leave the tracker untouched.
    pub fn commit_fight(&mut self, fight: &FightRecord, post_rating_a: f64, post_rating_b: f64) {
        let (result_a, result_b) = match fight.winner_label {
            Outcome::A => (SideResult::Win, SideResult::Loss),
            Outcome::B => (SideResult::Loss, SideResult::Win),
            Outcome::Draw => (SideResult::Draw, SideResult::Draw),
            Outcome::NoContest | Outcome::Unknown => return
        };

        self.apply_side(
            &fight.fighter_a_id,
            &fight.fighter_a_name,
            post_rating_a,
            fight.date,
            result_a
        );
        self.apply_side(
            &fight.fighter_b_id,
            &fight.fighter_b_name,
            post_rating_b,
            fight.date,
            result_b
        );
    }

    fn apply_side(
        &mut self,
        fighter_id: &str,
        fighter_name: &str,
        post_rating: f64,
        date: NaiveDate,
        result: SideResult
    ) {
        if let Some(state) = self.fighters.get_mut(fighter_id) {
            state.rating = post_rating;
            state.fights += 1;
            match result {
                SideResult::Win => state.wins += 1,
                SideResult::Loss => state.losses += 1,
                SideResult::Draw => state.draws += 1
            }
            state.last_date = date;
            // The roster sometimes respells a name between events; the most
            // recent spelling wins.
            if !fighter_name.is_empty() {
                state.fighter_name = fighter_name.to_owned();
            }
        }
    }

    /// Point-in-time copy of every fighter's state, sorted by rating
    /// descending with ties broken by fighter id ascending.
    pub fn snapshot(&self) -> Vec<FighterState> {
        self.fighters
            .values()
            .cloned()
            .sorted_by(|a, b| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap()
                    .then_with(|| a.fighter_id.cmp(&b.fighter_id))
            })
            .collect()
    }
}
