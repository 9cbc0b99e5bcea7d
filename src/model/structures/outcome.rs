use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Outcome of a bout from fighter A's perspective, as recorded in the ledger.
///
/// `NoContest` and `Unknown` are valid ledger entries that carry no rating
/// information: they produce no scores and leave both fighters untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    A,
    B,
    Draw,
    #[serde(rename = "nc")]
    #[strum(serialize = "nc")]
    NoContest,
    Unknown
}

impl Outcome {
    /// Actual scores `(score_a, score_b)` awarded by this outcome,
    /// or `None` when the bout is not rateable.
    pub fn scores(&self) -> Option<(f64, f64)> {
        match self {
            Outcome::A => Some((1.0, 0.0)),
            Outcome::B => Some((0.0, 1.0)),
            Outcome::Draw => Some((0.5, 0.5)),
            Outcome::NoContest | Outcome::Unknown => None
        }
    }

    pub fn is_rateable(&self) -> bool {
        self.scores().is_some()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::structures::outcome::Outcome;
    use strum::IntoEnumIterator;

    #[test]
    fn test_scores_win_a() {
        assert_eq!(Outcome::A.scores(), Some((1.0, 0.0)));
    }

    #[test]
    fn test_scores_win_b() {
        assert_eq!(Outcome::B.scores(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_scores_draw() {
        assert_eq!(Outcome::Draw.scores(), Some((0.5, 0.5)));
    }

    #[test]
    fn test_scores_unrated() {
        assert_eq!(Outcome::NoContest.scores(), None);
        assert_eq!(Outcome::Unknown.scores(), None);
    }

    #[test]
    fn test_rateable_outcomes_sum_to_one() {
        for outcome in Outcome::iter() {
            if let Some((score_a, score_b)) = outcome.scores() {
                assert_eq!(score_a + score_b, 1.0);
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::A.to_string(), "a");
        assert_eq!(Outcome::Draw.to_string(), "draw");
        assert_eq!(Outcome::NoContest.to_string(), "nc");
        assert_eq!(Outcome::Unknown.to_string(), "unknown");
    }
}
