//! Setlist planner (pulse-setlist) - command-line entry point
//!
//! Computes circuit timelines, checks track availability and generates
//! two-track music setlists from a session file and a track library.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_common::config::{resolve_database_path, TomlConfig};
use pulse_common::human_time::format_timeline_ms;
use pulse_common::RoundTemplateConfig;
use pulse_setlist::config::load_session_config;
use pulse_setlist::db::{
    save_track, InMemoryTrackRepository, SqliteTrackRepository, TrackRepository,
};
use pulse_setlist::setlist::setlist_summary;
use pulse_setlist::{RngSource, RoundTimingCalculator, SetlistError, SetlistService};

/// Command-line arguments for pulse-setlist
#[derive(Parser, Debug)]
#[command(name = "pulse-setlist")]
#[command(about = "Plan round-synchronized music setlists for circuit workouts")]
#[command(version)]
struct Args {
    /// Bootstrap configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite track database
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// JSON track file to use instead of the database
    #[arg(short, long)]
    tracks: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the round timeline for a session
    Timing {
        #[arg(short, long)]
        session: PathBuf,

        /// Round count including repeats (defaults to the session's effective count)
        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Check whether the track library can serve a session
    Validate {
        #[arg(short, long)]
        session: PathBuf,

        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Generate a setlist
    Generate {
        #[arg(short, long)]
        session: PathBuf,

        #[arg(short, long)]
        rounds: Option<u32>,

        /// Fixed random seed for a reproducible setlist
        #[arg(long)]
        seed: Option<u64>,

        /// Print the setlist as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Import tracks from a JSON file into the database
    Import {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, config_path) = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "pulse_setlist={level},pulse_common={level}",
                    level = toml_config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &config_path {
        Some(path) => info!("Configuration: {}", path.display()),
        None => warn!("No configuration file found, using compiled defaults"),
    }

    match args.command {
        Command::Timing { session, rounds } => {
            let session = load_session_config(&session)?;
            print_timing(&session, rounds.unwrap_or_else(|| session.effective_round_count()))
        }
        Command::Validate { session, rounds } => {
            let session = load_session_config(&session)?;
            let total_rounds = rounds.unwrap_or_else(|| session.effective_round_count());
            match &args.tracks {
                Some(path) => {
                    let repo = InMemoryTrackRepository::from_json_file(path)?;
                    validate(SetlistService::new(repo), total_rounds).await
                }
                None => {
                    let repo = open_database(args.database.as_deref(), &toml_config).await?;
                    validate(SetlistService::new(repo), total_rounds).await
                }
            }
        }
        Command::Generate { session, rounds, seed, json } => {
            let session = load_session_config(&session)?;
            let total_rounds = rounds.unwrap_or_else(|| session.effective_round_count());
            let request = GenerateRequest { session, total_rounds, seed, json };
            match &args.tracks {
                Some(path) => {
                    let repo = InMemoryTrackRepository::from_json_file(path)?;
                    generate(SetlistService::new(repo), request).await
                }
                None => {
                    let repo = open_database(args.database.as_deref(), &toml_config).await?;
                    generate(SetlistService::new(repo), request).await
                }
            }
        }
        Command::Import { file } => {
            let source = InMemoryTrackRepository::from_json_file(&file)?;
            let repo = open_database(args.database.as_deref(), &toml_config).await?;
            for track in source.tracks() {
                save_track(repo.pool(), track)
                    .await
                    .with_context(|| format!("Failed to save track {}", track.id))?;
            }
            println!("Imported {} tracks", source.tracks().len());
            Ok(())
        }
    }
}

struct GenerateRequest {
    session: RoundTemplateConfig,
    total_rounds: u32,
    seed: Option<u64>,
    json: bool,
}

async fn open_database(
    cli_arg: Option<&Path>,
    toml_config: &TomlConfig,
) -> Result<SqliteTrackRepository> {
    let db_path = resolve_database_path(cli_arg, toml_config);
    info!("Track database: {}", db_path.display());

    let pool = pulse_common::db::init_database(&db_path)
        .await
        .context("Failed to open track database")?;
    Ok(SqliteTrackRepository::new(pool))
}

fn print_timing(session: &RoundTemplateConfig, total_rounds: u32) -> Result<()> {
    let timing = RoundTimingCalculator::calculate(session, total_rounds).map_err(with_hint)?;

    for round in &timing.rounds {
        println!(
            "#{:<3} round {:<3} countdown {:>8}  work {:>8}  end {:>8}  ({} exercises{})",
            round.round_index + 1,
            round.round_number,
            format_timeline_ms(round.countdown_start_ms),
            format_timeline_ms(round.work_start_ms),
            format_timeline_ms(round.end_time_ms),
            round.exercise_count,
            if round.is_repeat { ", repeat" } else { "" },
        );
    }
    println!(
        "Total {}  work {}  rest {}",
        format_timeline_ms(timing.total_workout_duration_ms),
        format_timeline_ms(timing.total_work_time_ms),
        format_timeline_ms(timing.total_rest_time_ms),
    );
    Ok(())
}

async fn validate<T: TrackRepository>(service: SetlistService<T>, total_rounds: u32) -> Result<()> {
    let report = service.check_availability(total_rounds).await?;

    for issue in &report.issues {
        println!("- {}", issue);
    }
    if !report.is_valid {
        bail!("track library cannot serve {} rounds", total_rounds);
    }
    println!("Track availability OK for {} rounds", total_rounds);
    Ok(())
}

async fn generate<T: TrackRepository>(
    service: SetlistService<T>,
    request: GenerateRequest,
) -> Result<()> {
    let mut rng = match request.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let setlist = service
        .generate(&request.session, request.total_rounds, &mut rng)
        .await
        .map_err(with_hint)?;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&setlist)?);
    } else {
        println!("{}", setlist_summary(&setlist));
    }
    Ok(())
}

/// Attach an operator-facing hint to the core's error kinds
fn with_hint(err: SetlistError) -> anyhow::Error {
    let hint = match &err {
        SetlistError::Configuration(_) => Some("fix the session's round templates".to_string()),
        SetlistError::TrackUnavailable { usage, .. } => Some(format!("add more {} tracks", usage)),
        _ => None,
    };

    match hint {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => anyhow::Error::new(err),
    }
}
