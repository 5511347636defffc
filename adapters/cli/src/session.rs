//! Drives consecutive games against a single world.

use std::thread;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use snake_arena_core::{Cell, CollisionKind, Command, Direction, Event, GameConfig};
use snake_arena_system_game_log::{GameLog, HighScores};
use snake_arena_world::{self as world, query, World};
use tracing::{debug, info};

/// How each game of a session is played.
#[derive(Clone, Debug)]
pub(crate) struct PlayOptions {
    pub(crate) max_ticks: u64,
    pub(crate) realtime: bool,
    pub(crate) moves: Option<Vec<Direction>>,
}

/// Why a game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Outcome {
    Collision { cause: CollisionKind, cell: Cell },
    TickLimit,
}

/// Result of a single game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct GameSummary {
    pub(crate) game: u32,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) ticks: u64,
    pub(crate) length: usize,
    pub(crate) outcome: Outcome,
}

pub(crate) struct Session {
    world: World,
    log: GameLog,
    high_scores: HighScores,
    events: Vec<Event>,
    games_played: u32,
}

impl Session {
    pub(crate) fn new(config: GameConfig) -> Result<Self> {
        let world = World::with_config(config).context("invalid game configuration")?;
        info!("{}", query::welcome_banner(&world));
        Ok(Self {
            world,
            log: GameLog::new(),
            high_scores: HighScores::new(),
            events: Vec::new(),
            games_played: 0,
        })
    }

    pub(crate) fn play(&mut self, options: &PlayOptions) -> GameSummary {
        if self.games_played > 0 {
            self.submit(Command::Reset);
        }
        self.games_played += 1;
        self.submit(Command::SetAutoplay {
            enabled: options.moves.is_none(),
        });

        let mut outcome = Outcome::TickLimit;
        for tick in 0..options.max_ticks {
            let input = options
                .moves
                .as_deref()
                .and_then(|moves| usize::try_from(tick).ok().and_then(|index| moves.get(index)))
                .copied();
            self.submit(Command::Tick { input });

            if let Some(collision) = self.events.iter().find_map(|event| match event {
                Event::GameOver { cause, cell, .. } => Some(Outcome::Collision {
                    cause: *cause,
                    cell: *cell,
                }),
                _ => None,
            }) {
                outcome = collision;
                break;
            }

            if options.realtime {
                thread::sleep(query::tick_interval(&self.world));
            }
        }

        let summary = GameSummary {
            game: self.games_played,
            score: query::score(&self.world),
            level: query::level(&self.world),
            ticks: query::tick_index(&self.world),
            length: query::snake_body(&self.world).len(),
            outcome,
        };
        info!(
            game = summary.game,
            score = summary.score,
            level = summary.level,
            ticks = summary.ticks,
            "game finished"
        );
        summary
    }

    pub(crate) fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub(crate) fn log(&self) -> &GameLog {
        &self.log
    }

    fn submit(&mut self, command: Command) {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);
        debug!(?command, events = self.events.len(), "command applied");
        self.log.handle(&self.events);
        self.high_scores.handle(&self.events);
    }
}

/// Parses a move script made of `U`, `D`, `L` and `R`; whitespace is ignored.
pub(crate) fn parse_moves(script: &str) -> Result<Vec<Direction>> {
    let mut moves = Vec::with_capacity(script.len());
    for (position, symbol) in script.chars().enumerate() {
        let direction = match symbol.to_ascii_uppercase() {
            'U' => Direction::Up,
            'D' => Direction::Down,
            'L' => Direction::Left,
            'R' => Direction::Right,
            other if other.is_whitespace() => continue,
            other => bail!("unknown move {other:?} at position {position}"),
        };
        moves.push(direction);
    }
    Ok(moves)
}
