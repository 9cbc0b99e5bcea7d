pub mod config;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    ingest::{
        classify::{classify_fights, MethodWeights},
        csv_io,
        prepare::{build_unified, UnifiedFight},
        read_ledger, tables, IngestError
    },
    model::{
        constants::{
            DEFAULT_K, DEFAULT_RATING, DEFAULT_SCALE, MULTIPLIER_DECISION, MULTIPLIER_DOMINANT_DECISION,
            MULTIPLIER_FINISH
        },
        elo_model::{ConfigError, EloConfig, EloModel, ProcessingError},
        peaks::peak_ratings,
        structures::fight_audit::FightAudit
    },
    pipeline::config::{ConfigFileError, FileConfig}
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    ConfigFile(#[from] ConfigFileError),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error("events and results tables are required, via flags or the config file")]
    MissingInputs
}

/// The original two-column exports kept for spreadsheet consumers.
#[derive(Serialize)]
struct SimpleRating {
    fighter_name: String,
    rating: f64
}

#[derive(Serialize)]
struct SimplePeak {
    fighter_name: String,
    peak_rating: f64
}

/// Unifies the raw events and results tables (plus the optional fighter
/// roster) into the chronologically sorted fights table. Returns the number
/// of rows written.
pub fn run_prepare(
    events: &Path,
    results: &Path,
    fighters: Option<&Path>,
    out: &Path
) -> Result<usize, PipelineError> {
    let events = tables::read_events(events)?;
    let results = tables::read_results(results)?;
    let fighters = fighters.map(tables::read_fighters).transpose()?;

    let output = build_unified(&events, &results, fighters.as_deref());
    csv_io::write_rows_atomic(out, &output.fights)?;

    if output.dropped_undated > 0 {
        info!("Dropped {} undated rows", output.dropped_undated);
    }
    info!("Wrote {} unified fights to {}", output.fights.len(), out.display());
    Ok(output.fights.len())
}

/// Attaches method classes and multipliers to every unified fight. Returns
/// the number of rows written.
pub fn run_classify(input: &Path, out: &Path, weights: &MethodWeights) -> Result<usize, PipelineError> {
    weights.validate()?;

    let fights: Vec<UnifiedFight> = csv_io::read_rows(input)?;
    let classified = classify_fights(&fights, weights);
    csv_io::write_rows_atomic(out, &classified)?;

    info!("Wrote {} classified fights to {}", classified.len(), out.display());
    Ok(classified.len())
}

pub struct RateSummary {
    pub processed: usize,
    pub skipped: usize,
    pub fighters: usize
}

/// Replays the classified ledger through the Elo recurrence and writes the
/// audit history, the current-ratings snapshot and the simple two-column
/// export. Nothing is written unless the whole replay succeeds.
pub fn run_rate(
    input: &Path,
    out_history: &Path,
    out_ratings: &Path,
    out_ratings_simple: &Path,
    elo: EloConfig
) -> Result<RateSummary, PipelineError> {
    let mut model = EloModel::new(elo)?;
    let ledger = read_ledger(input)?;

    model.process(&ledger)?;

    let snapshot = model.rating_tracker.snapshot();
    let simple: Vec<SimpleRating> = snapshot
        .iter()
        .map(|s| SimpleRating {
            fighter_name: s.fighter_name.clone(),
            rating: s.rating
        })
        .collect();

    // All three artifacts commit together or not at all
    let staged = vec![
        csv_io::stage_rows(out_history, model.audit_history())?,
        csv_io::stage_rows(out_ratings, &snapshot)?,
        csv_io::stage_rows(out_ratings_simple, &simple)?,
    ];
    csv_io::commit_staged(staged)?;

    info!(
        "Rated {} fights ({} skipped) across {} fighters",
        model.audit_history().len(),
        model.skipped(),
        snapshot.len()
    );
    Ok(RateSummary {
        processed: model.audit_history().len(),
        skipped: model.skipped(),
        fighters: snapshot.len()
    })
}

/// Derives peak ratings purely from a persisted audit history file. Returns
/// the number of fighters written.
pub fn run_peak(input: &Path, out: &Path, out_simple: &Path) -> Result<usize, PipelineError> {
    let history: Vec<FightAudit> = csv_io::read_rows(input)?;
    let peaks = peak_ratings(&history);

    let simple: Vec<SimplePeak> = peaks
        .iter()
        .map(|p| SimplePeak {
            fighter_name: p.fighter_name.clone(),
            peak_rating: p.peak_rating
        })
        .collect();

    let staged = vec![csv_io::stage_rows(out, &peaks)?, csv_io::stage_rows(out_simple, &simple)?];
    csv_io::commit_staged(staged)?;

    info!("Wrote peak ratings for {} fighters to {}", peaks.len(), out.display());
    Ok(peaks.len())
}

/// Inputs for the whole-pipeline run. `None` fields fall back to the config
/// file, then to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct RunAllArgs {
    pub events: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub fighters: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub m_finish: Option<f64>,
    pub m_dom: Option<f64>,
    pub m_dec: Option<f64>,
    pub k: Option<f64>,
    pub scale: Option<f64>,
    pub base_rating: Option<f64>
}

/// Runs prepare, classify, rate and peak back to back against one build
/// directory.
pub fn run_all(args: &RunAllArgs) -> Result<(), PipelineError> {
    let file = args.config.as_deref().map(FileConfig::load).transpose()?.unwrap_or_default();

    let events = args
        .events
        .clone()
        .or(file.data.events)
        .ok_or(PipelineError::MissingInputs)?;
    let results = args
        .results
        .clone()
        .or(file.data.results)
        .ok_or(PipelineError::MissingInputs)?;
    let fighters = args.fighters.clone().or(file.data.fighters);

    let build_dir = args.build_dir.clone().unwrap_or(file.build.dir);
    let unified = build_dir.join(&file.build.unified);
    let classified = build_dir.join(&file.build.classified);
    let elo_history = build_dir.join(&file.build.elo_history);
    let elo_ratings = build_dir.join(&file.build.elo_ratings);
    let elo_ratings_simple = build_dir.join(&file.build.elo_ratings_simple);
    let peak = build_dir.join(&file.build.peak);
    let peak_simple = build_dir.join(&file.build.peak_simple);

    let weights = MethodWeights {
        finish: args.m_finish.or(file.params.classify.m_finish).unwrap_or(MULTIPLIER_FINISH),
        dominant: args
            .m_dom
            .or(file.params.classify.m_dom)
            .unwrap_or(MULTIPLIER_DOMINANT_DECISION),
        decision: args.m_dec.or(file.params.classify.m_dec).unwrap_or(MULTIPLIER_DECISION)
    };
    let elo = EloConfig {
        base_rating: args
            .base_rating
            .or(file.params.elo.base_rating)
            .unwrap_or(DEFAULT_RATING),
        k: args.k.or(file.params.elo.k).unwrap_or(DEFAULT_K),
        scale: args.scale.or(file.params.elo.scale).unwrap_or(DEFAULT_SCALE)
    };

    // Both parameter sets are validated before any stage touches the disk.
    weights.validate()?;
    elo.validate()?;

    info!("Step 1/4: prepare");
    run_prepare(&events, &results, fighters.as_deref(), &unified)?;

    info!("Step 2/4: classify");
    run_classify(&unified, &classified, &weights)?;

    info!("Step 3/4: rate");
    run_rate(&classified, &elo_history, &elo_ratings, &elo_ratings_simple, elo)?;

    info!("Step 4/4: peak");
    run_peak(&elo_history, &peak, &peak_simple)?;

    Ok(())
}
