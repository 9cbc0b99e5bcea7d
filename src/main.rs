use clap::Parser;
use mma_elo_processor::{
    args::{Args, Command},
    ingest::classify::MethodWeights,
    model::elo_model::EloConfig,
    pipeline::{self, PipelineError, RunAllArgs}
};
use tracing::error;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level);

    if let Err(e) = run(args.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(EnvFilter::new(log_level))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn run(command: Command) -> Result<(), PipelineError> {
    match command {
        Command::Prepare {
            events,
            results,
            fighters,
            out
        } => {
            pipeline::run_prepare(&events, &results, fighters.as_deref(), &out)?;
        }
        Command::Classify {
            input,
            out,
            m_finish,
            m_dom,
            m_dec
        } => {
            let weights = MethodWeights {
                finish: m_finish,
                dominant: m_dom,
                decision: m_dec
            };
            pipeline::run_classify(&input, &out, &weights)?;
        }
        Command::Rate {
            input,
            out_history,
            out_ratings,
            out_ratings_simple,
            base_rating,
            k,
            scale
        } => {
            let elo = EloConfig { base_rating, k, scale };
            pipeline::run_rate(&input, &out_history, &out_ratings, &out_ratings_simple, elo)?;
        }
        Command::Peak { input, out, out_simple } => {
            pipeline::run_peak(&input, &out, &out_simple)?;
        }
        Command::RunAll {
            events,
            results,
            fighters,
            config,
            build_dir,
            m_finish,
            m_dom,
            m_dec,
            k,
            scale,
            base_rating
        } => {
            pipeline::run_all(&RunAllArgs {
                events,
                results,
                fighters,
                config,
                build_dir,
                m_finish,
                m_dom,
                m_dec,
                k,
                scale,
                base_rating
            })?;
        }
    }

    Ok(())
}
