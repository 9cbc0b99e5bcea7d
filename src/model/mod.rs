pub mod constants;
pub mod elo_model;
pub mod peaks;
pub mod rating_tracker;
pub mod structures;
