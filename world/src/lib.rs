#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake Arena.
//!
//! The world owns the snake, the items, the obstacles and every scalar of a
//! running game. All mutation funnels through [`apply`], which processes one
//! [`Command`] to completion and reports what happened as [`Event`] values.
//! Read access goes through the [`query`] module.

mod occupancy;
#[cfg(any(test, feature = "scaffolding"))]
pub mod scaffolding;
mod snake;

use std::{collections::BTreeSet, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use snake_arena_core::{
    Cell, CollisionKind, Command, ConfigError, Direction, Event, GameConfig, Grid, Item, ItemId,
    PlayState, WELCOME_BANNER,
};
use snake_arena_system_autoplay::Autoplay;
use snake_arena_system_layout::obstacles_for_level;
use snake_arena_system_spawning::{self as spawning, Spawning};
use tracing::{debug, info, warn};

use crate::{occupancy::Occupancy, snake::Snake};

/// Represents the authoritative Snake Arena world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    direction: Direction,
    pending_direction: Option<Direction>,
    items: Vec<Item>,
    obstacles: BTreeSet<Cell>,
    occupancy: Occupancy,
    score: u32,
    level: u32,
    tick_interval: Duration,
    play_state: PlayState,
    autoplay_enabled: bool,
    autoplay: Autoplay,
    spawning: Spawning,
    rng: ChaCha8Rng,
    next_item_id: u64,
    tick_index: u64,
}

impl World {
    /// Creates a new world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(GameConfig::default())
    }

    /// Creates a new world after validating `config`.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let grid = config.grid();
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid,
            snake: Snake::new(config.initial_body()),
            direction: config.initial_direction,
            pending_direction: None,
            items: Vec::new(),
            obstacles: BTreeSet::new(),
            occupancy: Occupancy::new(grid),
            score: 0,
            level: 1,
            tick_interval: config.initial_interval(),
            play_state: PlayState::Running,
            autoplay_enabled: false,
            autoplay: Autoplay::new(),
            spawning: Spawning::new(spawning::Config::new(config.spawn_attempts)),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            next_item_id: 0,
            tick_index: 0,
            config,
        };
        let mut events = Vec::new();
        world.start_game(&mut events);
        world
    }

    fn start_game(&mut self, out_events: &mut Vec<Event>) {
        self.snake = Snake::new(self.config.initial_body());
        self.occupancy.fill_snake(self.snake.cells());
        self.direction = self.config.initial_direction;
        self.pending_direction = None;
        self.items.clear();
        self.score = 0;
        self.level = 1;
        self.tick_interval = self.config.initial_interval();
        self.play_state = PlayState::Running;
        self.tick_index = 0;
        self.regenerate_obstacles(out_events);
        self.replenish(false, out_events);
    }

    fn tick(&mut self, input: Option<Direction>, out_events: &mut Vec<Event>) {
        if self.play_state != PlayState::Running {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
            interval: self.tick_interval,
        });

        let requested = input.or(self.pending_direction.take());
        if self.autoplay_enabled {
            let body = self.snake.to_vec();
            let occupancy = &self.occupancy;
            let decision = self.autoplay.decide(
                self.grid,
                &body,
                &self.items,
                self.direction,
                |cell| occupancy.is_blocked(cell),
            );
            out_events.push(Event::AutoplayDecided {
                direction: decision.direction,
                target: decision.target,
                fallback: decision.fallback,
            });
            self.turn(decision.direction, out_events);
        } else if let Some(direction) = requested {
            self.turn(direction, out_events);
        }

        let Some(head) = self.snake.head() else {
            return;
        };
        let next = head.step(self.direction);
        if let Some(cause) = self.collision_at(next) {
            self.play_state = PlayState::GameOver;
            info!(
                cause = cause.label(),
                %next,
                score = self.score,
                level = self.level,
                length = self.snake.len(),
                "game over"
            );
            out_events.push(Event::GameOver {
                cause,
                cell: next,
                score: self.score,
                level: self.level,
            });
            return;
        }

        self.snake.push_head(next);
        self.occupancy.occupy_snake(next);

        let consumed = self
            .items
            .iter()
            .position(|item| item.cell == next)
            .map(|index| self.items.remove(index));
        let vacated = match consumed {
            Some(_) => None,
            None => self.snake.pop_tail(),
        };
        if let Some(tail) = vacated {
            self.occupancy.vacate_snake(tail);
        }
        out_events.push(Event::SnakeAdvanced {
            head: next,
            vacated,
        });

        if let Some(item) = consumed {
            let before = self.score;
            self.consume(item, out_events);
            if self.advance_level(before, out_events) {
                self.regenerate_obstacles(out_events);
            }
        }
        self.replenish(consumed.is_some(), out_events);
    }

    fn turn(&mut self, requested: Direction, out_events: &mut Vec<Event>) {
        if requested == self.direction {
            return;
        }
        if requested.is_opposite(self.direction) {
            debug!(current = ?self.direction, ?requested, "reversal rejected");
            out_events.push(Event::DirectionRejected {
                current: self.direction,
                requested,
            });
            return;
        }
        out_events.push(Event::DirectionChanged {
            from: self.direction,
            to: requested,
        });
        self.direction = requested;
    }

    fn collision_at(&self, cell: Cell) -> Option<CollisionKind> {
        if !self.grid.contains(cell) {
            Some(CollisionKind::OutOfBounds)
        } else if self.occupancy.is_snake(cell) {
            Some(CollisionKind::SelfCollision)
        } else if self.occupancy.is_obstacle(cell) {
            Some(CollisionKind::Obstacle)
        } else {
            None
        }
    }

    fn consume(&mut self, item: Item, out_events: &mut Vec<Event>) {
        let points = item.points();
        self.score = self.score.saturating_add(points);
        debug!(kind = item.kind.label(), points, score = self.score, "item consumed");
        out_events.push(Event::ItemConsumed {
            item: item.id,
            kind: item.kind,
            cell: item.cell,
            points,
            score: self.score,
        });

        if item.kind.affects_speed() {
            let interval = self
                .tick_interval
                .saturating_sub(self.config.interval_step())
                .max(self.config.min_interval());
            if interval != self.tick_interval {
                self.tick_interval = interval;
                out_events.push(Event::SpeedChanged { interval });
            }
        }
    }

    fn advance_level(&mut self, score_before: u32, out_events: &mut Vec<Event>) -> bool {
        if self.level >= self.config.max_level
            || !self
                .config
                .crosses_level_threshold(score_before, self.score)
        {
            return false;
        }
        self.level += 1;
        info!(level = self.level, score = self.score, "level advanced");
        out_events.push(Event::LevelAdvanced { level: self.level });
        true
    }

    fn regenerate_obstacles(&mut self, out_events: &mut Vec<Event>) {
        self.obstacles = obstacles_for_level(self.grid, self.level, self.config.max_level);
        self.occupancy.fill_obstacles(self.obstacles.iter());
        out_events.push(Event::ObstaclesRegenerated {
            level: self.level,
            count: self.obstacles.len(),
        });
    }

    fn replenish(&mut self, consumed: bool, out_events: &mut Vec<Event>) {
        while self.items.len() < self.config.min_items {
            if !self.spawn_item(out_events) {
                return;
            }
        }

        if consumed
            && self.items.len() < self.config.max_items
            && self.rng.gen::<f64>() < self.config.extra_item_chance
        {
            let _ = self.spawn_item(out_events);
        }
    }

    fn spawn_item(&mut self, out_events: &mut Vec<Event>) -> bool {
        let occupancy = &self.occupancy;
        let items = &self.items;
        let placement = self.spawning.spawn(&mut self.rng, self.grid, |cell| {
            occupancy.is_blocked(cell) || items.iter().any(|item| item.cell == cell)
        });

        match placement {
            Ok(placement) => {
                let item = Item {
                    id: ItemId::new(self.next_item_id),
                    cell: placement.cell,
                    kind: placement.kind,
                };
                self.next_item_id += 1;
                self.items.push(item);
                out_events.push(Event::ItemSpawned {
                    item: item.id,
                    kind: item.kind,
                    cell: item.cell,
                });
                true
            }
            Err(error) => {
                warn!(%error, items = self.items.len(), "item spawn skipped");
                out_events.push(Event::SpawnSkipped {
                    item_count: self.items.len(),
                });
                false
            }
        }
    }

    fn set_paused(&mut self, paused: bool, out_events: &mut Vec<Event>) {
        let next = match (self.play_state, paused) {
            (PlayState::Running, true) => PlayState::Paused,
            (PlayState::Paused, false) => PlayState::Running,
            _ => return,
        };
        self.play_state = next;
        out_events.push(Event::PauseChanged { paused });
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { input } => world.tick(input, out_events),
        Command::SteerSnake { direction } => {
            if world.play_state != PlayState::GameOver {
                world.pending_direction = Some(direction);
            }
        }
        Command::SetPaused { paused } => world.set_paused(paused, out_events),
        Command::TogglePause => {
            let paused = world.play_state == PlayState::Running;
            world.set_paused(paused, out_events);
        }
        Command::SetAutoplay { enabled } => {
            if world.autoplay_enabled != enabled {
                world.autoplay_enabled = enabled;
                world.pending_direction = None;
                info!(enabled, "autoplay toggled");
                out_events.push(Event::AutoplayChanged { enabled });
            }
        }
        Command::Reset => {
            out_events.push(Event::GameReset);
            world.start_game(out_events);
            info!(items = world.items.len(), "game reset");
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::{collections::BTreeSet, time::Duration};

    use snake_arena_core::{
        Cell, Direction, GameConfig, Grid, Item, PlayState, WorldSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Playing field dimensions.
    #[must_use]
    pub fn grid(world: &World) -> Grid {
        world.grid
    }

    /// Captures everything a renderer needs in a single owned value.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        WorldSnapshot {
            grid: world.grid,
            snake: world.snake.to_vec(),
            direction: world.direction,
            items: world.items.clone(),
            obstacles: world.obstacles.iter().copied().collect(),
            score: world.score,
            level: world.level,
            tick_interval: world.tick_interval,
            play_state: world.play_state,
            autoplay: world.autoplay_enabled,
        }
    }

    /// Snake cells, head first.
    #[must_use]
    pub fn snake_body(world: &World) -> Vec<Cell> {
        world.snake.to_vec()
    }

    /// Items in the order they were spawned.
    #[must_use]
    pub fn items(world: &World) -> &[Item] {
        &world.items
    }

    /// Obstacle cells of the active level.
    #[must_use]
    pub fn obstacles(world: &World) -> &BTreeSet<Cell> {
        &world.obstacles
    }

    /// Accumulated score of the current game.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Active level.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Interval the shell should wait before the next tick.
    #[must_use]
    pub fn tick_interval(world: &World) -> Duration {
        world.tick_interval
    }

    /// Lifecycle state of the current game.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }

    /// Current heading of the snake.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.direction
    }

    /// Reports whether the autoplay policy chooses directions.
    #[must_use]
    pub fn autoplay_enabled(world: &World) -> bool {
        world.autoplay_enabled
    }

    /// Number of ticks processed in the current game.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
