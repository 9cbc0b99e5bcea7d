use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::constants::{
    DEFAULT_K, DEFAULT_RATING, DEFAULT_SCALE, MULTIPLIER_DECISION, MULTIPLIER_DOMINANT_DECISION, MULTIPLIER_FINISH
};

#[derive(Parser, Clone)]
#[command(
    display_name = "MMA Elo Processor",
    long_about = "Turns raw fight tables into Elo rating artifacts: a unified ledger, \
    a classified ledger, a per-fight audit history, current ratings and peak ratings."
)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        global = true,
        help = "Sets the logging verbosity"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Unify raw events and results tables into one chronological fights table
    Prepare {
        /// Raw event details CSV (EVENT, DATE)
        #[arg(long, env = "MMA_ELO_EVENTS")]
        events: PathBuf,

        /// Raw fight results CSV
        #[arg(long, env = "MMA_ELO_RESULTS")]
        results: PathBuf,

        /// Optional fighter roster CSV mapping names to stable profile URLs
        #[arg(long, env = "MMA_ELO_FIGHTERS")]
        fighters: Option<PathBuf>,

        #[arg(short, long, default_value = "build/fights_unified.csv")]
        out: PathBuf,
    },

    /// Attach a method class and multiplier to every fight
    Classify {
        /// Unified fights CSV from the prepare stage
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "build/fights_classified.csv")]
        out: PathBuf,

        /// Multiplier for finishes
        #[arg(long, default_value_t = MULTIPLIER_FINISH)]
        m_finish: f64,

        /// Multiplier for dominant decisions
        #[arg(long, default_value_t = MULTIPLIER_DOMINANT_DECISION)]
        m_dom: f64,

        /// Multiplier for normal decisions, draws and no contests
        #[arg(long, default_value_t = MULTIPLIER_DECISION)]
        m_dec: f64,
    },

    /// Replay the classified ledger through the Elo recurrence
    Rate {
        /// Classified fights CSV from the classify stage
        #[arg(short, long)]
        input: PathBuf,

        /// Per-fight audit history output
        #[arg(long, default_value = "build/elo_history.csv")]
        out_history: PathBuf,

        /// Current ratings snapshot output
        #[arg(long, default_value = "build/elo_ratings_current.csv")]
        out_ratings: PathBuf,

        /// Two-column (fighter_name, rating) export
        #[arg(long, default_value = "build/elo_ratings_simple.csv")]
        out_ratings_simple: PathBuf,

        #[arg(long, default_value_t = DEFAULT_RATING)]
        base_rating: f64,

        /// Base K-factor, before method multipliers
        #[arg(short, long, default_value_t = DEFAULT_K)]
        k: f64,

        /// Logistic divisor of the win-probability curve
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: f64,
    },

    /// Derive peak ratings from a persisted audit history
    Peak {
        /// Audit history CSV from the rate stage
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "build/elo_peak_ratings.csv")]
        out: PathBuf,

        /// Two-column (fighter_name, peak_rating) export
        #[arg(long, default_value = "build/elo_peak_ratings_simple.csv")]
        out_simple: PathBuf,
    },

    /// Run the whole pipeline: prepare, classify, rate, peak
    RunAll {
        #[arg(long, env = "MMA_ELO_EVENTS")]
        events: Option<PathBuf>,

        #[arg(long, env = "MMA_ELO_RESULTS")]
        results: Option<PathBuf>,

        #[arg(long, env = "MMA_ELO_FIGHTERS")]
        fighters: Option<PathBuf>,

        /// Optional JSON config supplying paths and parameters; flags win
        #[arg(long, env = "MMA_ELO_CONFIG")]
        config: Option<PathBuf>,

        /// Directory all intermediate and final artifacts land in
        #[arg(long)]
        build_dir: Option<PathBuf>,

        #[arg(long)]
        m_finish: Option<f64>,

        #[arg(long)]
        m_dom: Option<f64>,

        #[arg(long)]
        m_dec: Option<f64>,

        #[arg(short, long)]
        k: Option<f64>,

        #[arg(long)]
        scale: Option<f64>,

        #[arg(long)]
        base_rating: Option<f64>,
    },
}
