#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Snake Arena sessions.

mod session;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use snake_arena_core::GameConfig;
use snake_arena_system_game_log::LogEntry;
use tracing::info;

use crate::session::{parse_moves, GameSummary, Outcome, PlayOptions, Session};

/// Number of log entries included in the final report.
const REPORTED_LOG_ENTRIES: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "snake-arena")]
#[command(version, about = "Headless Snake Arena simulation")]
struct Cli {
    /// TOML file with game configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for item placement, overriding the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Number of consecutive games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Safety cap on ticks per game
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Scripted moves (U, D, L, R), one per tick; disables autoplay
    #[arg(long)]
    moves: Option<String>,

    /// Wait for the current tick interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    games: Vec<GameSummary>,
    high_scores: &'a [u32],
    recent_log: Vec<&'a LogEntry>,
}

/// Entry point for the Snake Arena command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let moves = cli.moves.as_deref().map(parse_moves).transpose()?;
    let options = PlayOptions {
        max_ticks: cli.max_ticks,
        realtime: cli.realtime,
        moves,
    };

    let mut session = Session::new(config)?;
    let games: Vec<GameSummary> = (0..cli.games).map(|_| session.play(&options)).collect();

    let report = Report {
        games,
        high_scores: session.high_scores().scores(),
        recent_log: session.log().entries().take(REPORTED_LOG_ENTRIES).collect(),
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config: GameConfig = toml::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            config
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.rng_seed = seed;
    }
    Ok(config)
}

fn print_report(report: &Report<'_>) {
    for game in &report.games {
        let ending = match game.outcome {
            Outcome::Collision { cause, cell } => format!("hit {} at {cell}", cause.label()),
            Outcome::TickLimit => "tick limit reached".to_owned(),
        };
        println!(
            "game {}: score {} level {} length {} after {} ticks ({ending})",
            game.game, game.score, game.level, game.length, game.ticks
        );
    }

    let scores: Vec<String> = report.high_scores.iter().map(u32::to_string).collect();
    println!("high scores: {}", scores.join(", "));

    for entry in &report.recent_log {
        println!("  [{:>5}] {:?}: {}", entry.tick, entry.severity, entry.message);
    }
}
