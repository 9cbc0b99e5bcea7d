// Model constants
pub const DEFAULT_RATING: f64 = 1500.0;
pub const DEFAULT_K: f64 = 24.0;
pub const DEFAULT_SCALE: f64 = 350.0;
// Default method multipliers
pub const MULTIPLIER_FINISH: f64 = 1.20;
pub const MULTIPLIER_DOMINANT_DECISION: f64 = 1.10;
pub const MULTIPLIER_DECISION: f64 = 1.00;
// Scorecard dominance thresholds
pub const DOMINANT_SINGLE_MARGIN: u64 = 3;
pub const DOMINANT_CARD_MARGIN: u64 = 2;
pub const DOMINANT_CARD_COUNT: usize = 2;
pub const DEFAULT_ROUNDS_SCHEDULED: u32 = 3;
