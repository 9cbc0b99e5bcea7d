use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    model::{
        constants::{DEFAULT_K, DEFAULT_RATING, DEFAULT_SCALE},
        rating_tracker::RatingTracker,
        structures::{fight_audit::FightAudit, fight_record::FightRecord}
    },
    utils::progress_utils::progress_bar
};

/// Parameters of the Elo recurrence.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EloConfig {
    pub base_rating: f64,
    pub k: f64,
    pub scale: f64
}

impl Default for EloConfig {
    fn default() -> Self {
        EloConfig {
            base_rating: DEFAULT_RATING,
            k: DEFAULT_K,
            scale: DEFAULT_SCALE
        }
    }
}

impl EloConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::NonPositiveScale(self.scale));
        }
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(ConfigError::InvalidK(self.k));
        }
        if !self.base_rating.is_finite() {
            return Err(ConfigError::InvalidBaseRating(self.base_rating));
        }

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rating scale must be positive and finite, got {0}")]
    NonPositiveScale(f64),
    #[error("K-factor must be non-negative and finite, got {0}")]
    InvalidK(f64),
    #[error("base rating must be finite, got {0}")]
    InvalidBaseRating(f64),
    #[error("method multiplier for {class} must be non-negative and finite, got {value}")]
    InvalidMultiplier { class: String, value: f64 }
}

/// Raised while replaying the ledger. All variants name the offending
/// record; nothing is committed once one of these is returned.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("{event}: {bout} on {date} pairs a fighter against themselves")]
    SelfBout {
        date: NaiveDate,
        event: String,
        bout: String
    },
    #[error("ledger is not chronological: {event}: {bout} on {date} appears after {previous}")]
    OutOfOrder {
        date: NaiveDate,
        previous: NaiveDate,
        event: String,
        bout: String
    },
    #[error("{event}: {bout} on {date} has an invalid method multiplier {multiplier}")]
    InvalidMultiplier {
        date: NaiveDate,
        event: String,
        bout: String,
        multiplier: f64
    }
}

/// Probability that A beats B under the logistic Elo curve.
pub fn win_probability(rating_a: f64, rating_b: f64, scale: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / scale))
}

pub struct EloModel {
    config: EloConfig,
    pub rating_tracker: RatingTracker,
    audit_history: Vec<FightAudit>,
    skipped: usize
}

impl EloModel {
    pub fn new(config: EloConfig) -> Result<EloModel, ConfigError> {
        config.validate()?;

        Ok(EloModel {
            rating_tracker: RatingTracker::new(config.base_rating),
            audit_history: Vec::new(),
            skipped: 0,
            config
        })
    }

    pub fn config(&self) -> &EloConfig {
        &self.config
    }

    /// # Fight Ledger Replay
    ///
    /// Replays the full ledger in order, which is where all rating changes
    /// occur.
    ///
    /// Steps:
    /// 1. Validate the whole ledger up front: fighters must differ, dates
    ///    must be non-decreasing, multipliers must be usable. A bad record
    ///    aborts before anything is committed.
    /// 2. Replay each bout. Rated outcomes move ratings and append one
    ///    audit entry; no contests and unknown outcomes are counted as
    ///    skipped and leave no trace.
    pub fn process(&mut self, ledger: &[FightRecord]) -> Result<(), ProcessingError> {
        self.validate_ledger(ledger)?;

        let progress_bar = progress_bar(ledger.len() as u64, "Processing fight ledger".to_string());
        for fight in ledger {
            self.process_fight(fight);
            progress_bar.inc(1);
        }
        progress_bar.finish();

        Ok(())
    }

    fn validate_ledger(&self, ledger: &[FightRecord]) -> Result<(), ProcessingError> {
        let mut previous: Option<NaiveDate> = None;

        for fight in ledger {
            if fight.fighter_a_id == fight.fighter_b_id {
                return Err(ProcessingError::SelfBout {
                    date: fight.date,
                    event: fight.event.clone(),
                    bout: fight.bout.clone()
                });
            }

            if !fight.method_multiplier.is_finite() || fight.method_multiplier < 0.0 {
                return Err(ProcessingError::InvalidMultiplier {
                    date: fight.date,
                    event: fight.event.clone(),
                    bout: fight.bout.clone(),
                    multiplier: fight.method_multiplier
                });
            }

            if let Some(previous) = previous {
                if fight.date < previous {
                    return Err(ProcessingError::OutOfOrder {
                        date: fight.date,
                        previous,
                        event: fight.event.clone(),
                        bout: fight.bout.clone()
                    });
                }
            }
            previous = Some(fight.date);
        }

        Ok(())
    }

    fn process_fight(&mut self, fight: &FightRecord) {
        let (score_a, score_b) = match fight.winner_label.scores() {
            Some(scores) => scores,
            None => {
                self.skipped += 1;
                debug!("Skipping unrated bout {} ({})", fight.bout, fight.winner_label);
                return;
            }
        };

        let pre_rating_a = self
            .rating_tracker
            .get_or_create(&fight.fighter_a_id, &fight.fighter_a_name, fight.date)
            .rating;
        let pre_rating_b = self
            .rating_tracker
            .get_or_create(&fight.fighter_b_id, &fight.fighter_b_name, fight.date)
            .rating;

        let p_a_win = win_probability(pre_rating_a, pre_rating_b, self.config.scale);
        let k_eff = self.config.k * fight.method_multiplier;

        // A single signed delta keeps the exchange exactly zero-sum.
        let delta = k_eff * (score_a - p_a_win);
        let post_rating_a = pre_rating_a + delta;
        let post_rating_b = pre_rating_b - delta;

        self.rating_tracker.commit_fight(fight, post_rating_a, post_rating_b);

        self.audit_history.push(FightAudit {
            date: fight.date,
            event: fight.event.clone(),
            bout: fight.bout.clone(),
            fighter_a_id: fight.fighter_a_id.clone(),
            fighter_b_id: fight.fighter_b_id.clone(),
            fighter_a_name: fight.fighter_a_name.clone(),
            fighter_b_name: fight.fighter_b_name.clone(),
            pre_rating_a,
            pre_rating_b,
            p_a_win,
            score_a,
            score_b,
            winner_label: fight.winner_label,
            method_class: fight.method_class,
            method_multiplier: fight.method_multiplier,
            k_eff,
            rounds_scheduled: fight.rounds_scheduled,
            weight_class: fight.weight_class.clone(),
            method: fight.method.clone(),
            referee: fight.referee.clone(),
            url: fight.url.clone(),
            post_rating_a,
            post_rating_b
        });
    }

    /// Audit entries in replay order, one per rated bout.
    pub fn audit_history(&self) -> &[FightAudit] {
        &self.audit_history
    }

    /// Number of ledger rows that produced no rating change.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use crate::{
        model::{
            elo_model::{win_probability, ConfigError, EloConfig, EloModel, ProcessingError},
            structures::{method_class::MethodClass, outcome::Outcome}
        },
        utils::test_utils::{generate_fight, generate_ledger}
    };

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2012, 7, day).unwrap()
    }

    fn default_model() -> EloModel {
        EloModel::new(EloConfig::default()).unwrap()
    }

    #[test]
    fn test_win_probability_equal_ratings() {
        assert_abs_diff_eq!(win_probability(1500.0, 1500.0, 350.0), 0.5);
    }

    #[test]
    fn test_win_probability_complementary() {
        let p_a = win_probability(1650.0, 1420.0, 350.0);
        let p_b = win_probability(1420.0, 1650.0, 350.0);

        assert!(p_a > 0.5);
        assert_abs_diff_eq!(p_a + p_b, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_win_probability_stays_within_open_interval() {
        // A 4000-point gap is far beyond anything a real ledger produces
        let near_certain = win_probability(5500.0, 1500.0, 350.0);
        let near_zero = win_probability(1500.0, 5500.0, 350.0);

        assert!(near_certain > 0.999 && near_certain < 1.0);
        assert!(near_zero > 0.0 && near_zero < 0.001);
    }

    #[test]
    fn test_win_probability_narrows_with_larger_scale() {
        let tight = win_probability(1600.0, 1400.0, 200.0);
        let loose = win_probability(1600.0, 1400.0, 700.0);

        assert!(tight > loose);
        assert!(loose > 0.5);
    }

    #[test]
    fn test_finish_between_equals_moves_exactly_fourteen_point_four() {
        let mut model = default_model();
        let mut fight = generate_fight(date(1), "a", "b", Outcome::A, 1.2);
        fight.method_class = MethodClass::Finish;

        model.process(&[fight]).unwrap();

        let winner = model.rating_tracker.get("a").unwrap();
        let loser = model.rating_tracker.get("b").unwrap();

        assert_abs_diff_eq!(winner.rating, 1514.4, epsilon = 1e-9);
        assert_abs_diff_eq!(loser.rating, 1485.6, epsilon = 1e-9);

        let audit = &model.audit_history()[0];
        assert_abs_diff_eq!(audit.p_a_win, 0.5);
        assert_abs_diff_eq!(audit.k_eff, 28.8, epsilon = 1e-12);
        assert_abs_diff_eq!(audit.score_a, 1.0);
        assert_abs_diff_eq!(audit.score_b, 0.0);
    }

    #[test]
    fn test_draw_between_equals_changes_nothing() {
        let mut model = default_model();
        let fight = generate_fight(date(1), "a", "b", Outcome::Draw, 1.0);

        model.process(&[fight]).unwrap();

        assert_abs_diff_eq!(model.rating_tracker.get("a").unwrap().rating, 1500.0);
        assert_abs_diff_eq!(model.rating_tracker.get("b").unwrap().rating, 1500.0);
        assert_eq!(model.audit_history().len(), 1);
    }

    #[test]
    fn test_draw_drains_the_favorite() {
        let mut model = default_model();
        let ledger = vec![
            generate_fight(date(1), "a", "b", Outcome::A, 1.2),
            generate_fight(date(2), "a", "b", Outcome::Draw, 1.0),
        ];

        model.process(&ledger).unwrap();

        let favorite = model.rating_tracker.get("a").unwrap();
        let underdog = model.rating_tracker.get("b").unwrap();

        // After the first win A is rated higher, so a draw costs A points.
        let first_win = &model.audit_history()[0];
        let draw = &model.audit_history()[1];
        assert!(draw.post_rating_a < first_win.post_rating_a);
        assert!(favorite.rating > underdog.rating);
        assert_abs_diff_eq!(favorite.rating + underdog.rating, 3000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_contest_changes_nothing_and_leaves_no_audit() {
        let mut model = default_model();
        let ledger = vec![
            generate_fight(date(1), "a", "b", Outcome::A, 1.0),
            generate_fight(date(2), "a", "b", Outcome::NoContest, 1.0),
        ];

        model.process(&ledger).unwrap();

        assert_eq!(model.audit_history().len(), 1);
        assert_eq!(model.skipped(), 1);
        assert_eq!(model.rating_tracker.get("a").unwrap().fights, 1);
    }

    #[test]
    fn test_unknown_outcome_is_skipped() {
        let mut model = default_model();
        let fight = generate_fight(date(1), "a", "b", Outcome::Unknown, 1.0);

        model.process(&[fight]).unwrap();

        assert_eq!(model.skipped(), 1);
        assert!(model.rating_tracker.is_empty());
    }

    #[test]
    fn test_zero_multiplier_rates_with_zero_weight() {
        let mut model = default_model();
        let fight = generate_fight(date(1), "a", "b", Outcome::A, 0.0);

        model.process(&[fight]).unwrap();

        let winner = model.rating_tracker.get("a").unwrap();
        assert_abs_diff_eq!(winner.rating, 1500.0);
        assert_eq!(winner.wins, 1);
        assert_eq!(model.audit_history().len(), 1);
        assert_abs_diff_eq!(model.audit_history()[0].k_eff, 0.0);
    }

    #[test]
    fn test_audit_chain_is_continuous() {
        let mut model = default_model();
        let ledger = vec![
            generate_fight(date(1), "a", "b", Outcome::A, 1.2),
            generate_fight(date(2), "a", "c", Outcome::B, 1.0),
            generate_fight(date(3), "a", "b", Outcome::Draw, 1.1),
        ];

        model.process(&ledger).unwrap();

        let history = model.audit_history();
        assert_abs_diff_eq!(history[1].pre_rating_a, history[0].post_rating_a);
        assert_abs_diff_eq!(history[2].pre_rating_a, history[1].post_rating_a);
        assert_abs_diff_eq!(history[2].pre_rating_b, history[0].post_rating_b);
    }

    #[test]
    fn test_ratings_remain_zero_sum_over_long_ledgers() {
        let mut model = default_model();
        let ledger = generate_ledger(500, 12);

        model.process(&ledger).unwrap();

        let total: f64 = model.rating_tracker.snapshot().iter().map(|s| s.rating).sum();
        let expected = model.rating_tracker.len() as f64 * 1500.0;
        assert_abs_diff_eq!(total, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_self_bout_aborts_without_state_changes() {
        let mut model = default_model();
        let ledger = vec![
            generate_fight(date(1), "a", "b", Outcome::A, 1.0),
            generate_fight(date(2), "c", "c", Outcome::A, 1.0),
        ];

        let result = model.process(&ledger);

        assert!(matches!(result, Err(ProcessingError::SelfBout { .. })));
        assert!(model.rating_tracker.is_empty());
        assert!(model.audit_history().is_empty());
    }

    #[test]
    fn test_out_of_order_ledger_aborts() {
        let mut model = default_model();
        let ledger = vec![
            generate_fight(date(5), "a", "b", Outcome::A, 1.0),
            generate_fight(date(2), "a", "b", Outcome::B, 1.0),
        ];

        let result = model.process(&ledger);

        assert!(matches!(result, Err(ProcessingError::OutOfOrder { .. })));
        assert!(model.rating_tracker.is_empty());
    }

    #[test]
    fn test_non_finite_multiplier_aborts() {
        let mut model = default_model();
        let fight = generate_fight(date(1), "a", "b", Outcome::A, f64::NAN);

        let result = model.process(&[fight]);

        assert!(matches!(result, Err(ProcessingError::InvalidMultiplier { .. })));
    }

    #[test]
    fn test_negative_multiplier_aborts() {
        let mut model = default_model();
        let fight = generate_fight(date(1), "a", "b", Outcome::A, -0.5);

        let result = model.process(&[fight]);

        assert!(matches!(result, Err(ProcessingError::InvalidMultiplier { .. })));
    }

    #[test]
    fn test_invalid_configs_are_rejected() {
        let zero_scale = EloConfig {
            scale: 0.0,
            ..EloConfig::default()
        };
        let negative_k = EloConfig {
            k: -24.0,
            ..EloConfig::default()
        };

        assert!(matches!(EloModel::new(zero_scale), Err(ConfigError::NonPositiveScale(_))));
        assert!(matches!(EloModel::new(negative_k), Err(ConfigError::InvalidK(_))));
    }
}
