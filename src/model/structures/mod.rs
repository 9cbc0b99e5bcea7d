pub mod fight_audit;
pub mod fight_record;
pub mod fighter_state;
pub mod method_class;
pub mod outcome;

/// Stable identifier of a fighter: the roster profile URL when one is
/// known, otherwise the normalized lowercase name.
pub type FighterId = String;
