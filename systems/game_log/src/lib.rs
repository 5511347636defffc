#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Human-readable game log and in-memory high-score table.
//!
//! Both systems are pure observers: they consume the events broadcast by the
//! world and never issue commands.

use std::collections::VecDeque;

use serde::Serialize;
use snake_arena_core::{Event, HIGH_SCORE_CAPACITY, LOG_CAPACITY};
use tracing::{error, info, warn};

/// Importance of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Routine state changes.
    Info,
    /// Rewards such as consumed items.
    Success,
    /// Recoverable oddities such as rejected input.
    Warning,
    /// Failures, including the collision that ends a game.
    Error,
    /// Game lifecycle milestones.
    Game,
}

/// Single line of the game log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Monotonically increasing sequence number.
    pub sequence: u64,
    /// Tick index the entry was recorded on.
    pub tick: u64,
    /// Importance of the entry.
    pub severity: Severity,
    /// Rendered message.
    pub message: String,
}

/// Bounded newest-first log derived from world events.
#[derive(Debug)]
pub struct GameLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_sequence: u64,
    tick: u64,
}

impl GameLog {
    /// Creates a log retaining the default number of entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(LOG_CAPACITY)
    }

    /// Creates a log retaining at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
            tick: 0,
        }
    }

    /// Records an entry for every event worth showing to a player.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match *event {
                Event::TimeAdvanced { tick, .. } => self.tick = tick,
                Event::DirectionRejected { current, requested } => self.record(
                    Severity::Warning,
                    format!("ignored reversal from {current:?} to {requested:?}"),
                ),
                Event::AutoplayDecided {
                    direction,
                    fallback: true,
                    ..
                } => self.record(
                    Severity::Warning,
                    format!("autoplay found no route, heading {direction:?}"),
                ),
                Event::ItemConsumed {
                    kind,
                    points,
                    score,
                    ..
                } => self.record(
                    Severity::Success,
                    format!("ate {} (+{points}), score {score}", kind.label()),
                ),
                Event::SpeedChanged { interval } => self.record(
                    Severity::Info,
                    format!("speed up: {} ms per tick", interval.as_millis()),
                ),
                Event::LevelAdvanced { level } => {
                    self.record(Severity::Game, format!("level {level} reached"));
                }
                Event::ObstaclesRegenerated { level, count } if count > 0 => self.record(
                    Severity::Info,
                    format!("level {level} layout has {count} obstacles"),
                ),
                Event::SpawnSkipped { item_count } => self.record(
                    Severity::Warning,
                    format!("no room for another item ({item_count} on the grid)"),
                ),
                Event::GameOver {
                    cause,
                    cell,
                    score,
                    level,
                } => self.record(
                    Severity::Error,
                    format!(
                        "game over: hit {} at {cell} with score {score} on level {level}",
                        cause.label()
                    ),
                ),
                Event::PauseChanged { paused } => {
                    let message = if paused { "paused" } else { "resumed" };
                    self.record(Severity::Info, message.to_owned());
                }
                Event::AutoplayChanged { enabled } => {
                    let state = if enabled { "enabled" } else { "disabled" };
                    self.record(Severity::Info, format!("autoplay {state}"));
                }
                Event::GameReset => {
                    self.tick = 0;
                    self.record(Severity::Game, "new game started".to_owned());
                }
                _ => {}
            }
        }
    }

    /// Prepends an entry, evicting the oldest one when the log is full.
    pub fn record(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Error => error!(tick = self.tick, "{message}"),
            Severity::Warning => warn!(tick = self.tick, "{message}"),
            Severity::Info | Severity::Success | Severity::Game => {
                info!(tick = self.tick, ?severity, "{message}");
            }
        }

        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_back();
        }
        self.entries.push_front(LogEntry {
            sequence: self.next_sequence,
            tick: self.tick,
            severity,
            message,
        });
        self.next_sequence += 1;
    }

    /// Entries from newest to oldest.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry. Sequence numbers keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GameLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Best final scores, highest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HighScores {
    scores: Vec<u32>,
    capacity: usize,
}

impl HighScores {
    /// Creates an empty table with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: Vec::with_capacity(HIGH_SCORE_CAPACITY + 1),
            capacity: HIGH_SCORE_CAPACITY,
        }
    }

    /// Records the final score of every finished game in `events`.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            if let Event::GameOver { score, .. } = event {
                let _ = self.record(*score);
            }
        }
    }

    /// Inserts `score` and returns its zero-based rank if it made the table.
    ///
    /// Equal scores rank below the ones already present.
    pub fn record(&mut self, score: u32) -> Option<usize> {
        let rank = self.scores.partition_point(|existing| *existing >= score);
        if rank >= self.capacity {
            return None;
        }
        self.scores.insert(rank, score);
        self.scores.truncate(self.capacity);
        Some(rank)
    }

    /// Scores from highest to lowest.
    #[must_use]
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Highest recorded score.
    #[must_use]
    pub fn best(&self) -> Option<u32> {
        self.scores.first().copied()
    }
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}
