use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How a bout ended, as decided by the method classifier.
///
/// The class selects the method multiplier applied to the K-factor:
/// finishes count more than dominant decisions, which count more than
/// ordinary decisions. `Draw`, `NoContest` and `Other` carry the neutral
/// multiplier of 1.0.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MethodClass {
    Finish,
    DecisionDominant,
    DecisionNormal,
    Draw,
    #[serde(rename = "nc")]
    #[strum(serialize = "nc")]
    NoContest,
    Other
}
