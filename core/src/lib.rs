#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Arena engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! happened during the tick. Systems query immutable snapshots and never
//! mutate the world directly.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake Arena.";

/// Number of entries retained by bounded event logs.
pub const LOG_CAPACITY: usize = 100;

/// Number of scores retained by the high-score table.
pub const HIGH_SCORE_CAPACITY: usize = 5;

/// Longest accepted grid side, keeping every coordinate within `i32`.
pub const MAX_GRID_SIDE: u32 = 1 << 16;

/// Largest accepted grid area; occupancy masks allocate one slot per cell.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

/// Cardinal movement directions available to the snake.
///
/// The declaration order doubles as the fixed neighbour-expansion order used
/// wherever ties must be broken deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All directions in expansion order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns true if turning from `self` to `other` would be a 180-degree turn.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Unit offset `(dx, dy)` travelled by one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction leading from `from` to the 4-adjacent cell `to`, if they are adjacent.
    #[must_use]
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        Self::ALL
            .into_iter()
            .find(|direction| from.step(*direction) == to)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so a head stepping off the board is still
/// representable; [`Grid::contains`] decides whether a cell is playable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Cell reached by moving one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// The four orthogonal neighbours in `Up, Down, Left, Right` order.
    ///
    /// Neighbours are not bounds-checked.
    #[must_use]
    pub const fn adjacent4(self) -> [Cell; 4] {
        [
            self.step(Direction::Up),
            self.step(Direction::Down),
            self.step(Direction::Left),
            self.step(Direction::Right),
        ]
    }

    /// Reports whether `other` shares an edge with this cell.
    #[must_use]
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size playing field measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    /// Creates a grid description with the provided dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let (Ok(x), Ok(y)) = (u32::try_from(cell.x()), u32::try_from(cell.y())) else {
            return false;
        };
        x < self.width && y < self.height
    }

    /// Row-major index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        y.checked_mul(width)?.checked_add(x)
    }

    /// Cell stored at the provided row-major index, if it lies inside the grid.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.cell_count() || self.width == 0 {
            return None;
        }
        let width = usize::try_from(self.width).ok()?;
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(Cell::new(x, y))
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height).unwrap_or(i32::MAX);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

/// Unique identifier assigned to an item by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new item identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Kinds of consumable items, ordered from most common to rarest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Common item worth 10 points.
    Apple,
    /// Item worth 20 points.
    Orange,
    /// Item worth 30 points.
    Grape,
    /// Rarest item worth 50 points that also shortens the tick interval.
    Bolt,
}

impl ItemKind {
    /// Score granted when the item is consumed.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Apple => 10,
            Self::Orange => 20,
            Self::Grape => 30,
            Self::Bolt => 50,
        }
    }

    /// Reports whether consuming the item speeds the game up.
    #[must_use]
    pub const fn affects_speed(self) -> bool {
        matches!(self, Self::Bolt)
    }

    /// Maps a uniform sample in `[0, 1)` onto the cumulative spawn table.
    ///
    /// Apple 40%, Orange 20%, Grape 20%, Bolt 20%.
    #[must_use]
    pub fn from_roll(roll: f64) -> Self {
        if roll > 0.8 {
            Self::Bolt
        } else if roll > 0.6 {
            Self::Grape
        } else if roll > 0.4 {
            Self::Orange
        } else {
            Self::Apple
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apple => "apple",
            Self::Orange => "orange",
            Self::Grape => "grape",
            Self::Bolt => "bolt",
        }
    }
}

/// Consumable item resting on a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Identifier allocated to the item by the world.
    pub id: ItemId,
    /// Cell occupied by the item.
    pub cell: Cell,
    /// Kind of the item, which determines its value and effect.
    pub kind: ItemKind,
}

impl Item {
    /// Score granted when the item is consumed.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.kind.points()
    }
}

/// Lifecycle state of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// Ticks advance the simulation.
    Running,
    /// Ticks are ignored until the game is resumed.
    Paused,
    /// Terminal state reached after a fatal collision; only a reset leaves it.
    GameOver,
}

/// Fatal collisions, listed in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionKind {
    /// The head left the grid.
    OutOfBounds,
    /// The head entered a cell occupied by the snake's own body.
    SelfCollision,
    /// The head entered an obstacle cell.
    Obstacle,
}

impl CollisionKind {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfBounds => "wall",
            Self::SelfCollision => "own tail",
            Self::Obstacle => "obstacle",
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by one step.
    Tick {
        /// Directional intent supplied with this tick. Takes precedence over a
        /// queued [`Command::SteerSnake`] request and is ignored under autoplay.
        input: Option<Direction>,
    },
    /// Queues a directional intent that is consumed at the start of the next tick.
    SteerSnake {
        /// Requested heading.
        direction: Direction,
    },
    /// Pauses or resumes the simulation.
    SetPaused {
        /// Whether ticks should be suspended.
        paused: bool,
    },
    /// Flips between running and paused.
    TogglePause,
    /// Enables or disables pathfinding-driven autoplay.
    SetAutoplay {
        /// Whether the autoplay policy chooses directions.
        enabled: bool,
    },
    /// Discards the current game and starts a fresh one.
    Reset,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that a tick started processing.
    TimeAdvanced {
        /// One-based index of the tick within the current game.
        tick: u64,
        /// Tick interval in effect when the tick started.
        interval: Duration,
    },
    /// The snake turned.
    DirectionChanged {
        /// Heading before the turn.
        from: Direction,
        /// Heading after the turn.
        to: Direction,
    },
    /// A request to reverse onto the body was ignored.
    DirectionRejected {
        /// Heading that remains in effect.
        current: Direction,
        /// Heading that was requested.
        requested: Direction,
    },
    /// The autoplay policy chose a heading for this tick.
    AutoplayDecided {
        /// Heading chosen by the policy.
        direction: Direction,
        /// Item cell the policy is routing toward, if a path was found.
        target: Option<Cell>,
        /// Indicates whether the safety heuristic was used instead of a path.
        fallback: bool,
    },
    /// The snake moved one cell.
    SnakeAdvanced {
        /// New head cell.
        head: Cell,
        /// Tail cell released by the move, absent when the snake grew.
        vacated: Option<Cell>,
    },
    /// The head consumed an item.
    ItemConsumed {
        /// Identifier of the consumed item.
        item: ItemId,
        /// Kind of the consumed item.
        kind: ItemKind,
        /// Cell the item occupied.
        cell: Cell,
        /// Points granted by the item.
        points: u32,
        /// Score after applying the item.
        score: u32,
    },
    /// The tick interval changed.
    SpeedChanged {
        /// New interval between ticks.
        interval: Duration,
    },
    /// The game advanced to a new level.
    LevelAdvanced {
        /// Level that became active.
        level: u32,
    },
    /// The obstacle layout was rebuilt for a level.
    ObstaclesRegenerated {
        /// Level the layout belongs to.
        level: u32,
        /// Number of obstacle cells in the layout.
        count: usize,
    },
    /// A new item was placed on the grid.
    ItemSpawned {
        /// Identifier assigned to the item.
        item: ItemId,
        /// Kind of the new item.
        kind: ItemKind,
        /// Cell occupied by the item.
        cell: Cell,
    },
    /// Item replenishment stopped because no free cell remained.
    SpawnSkipped {
        /// Number of items present after replenishment stopped.
        item_count: usize,
    },
    /// A fatal collision ended the game.
    GameOver {
        /// Collision that ended the game.
        cause: CollisionKind,
        /// Cell the head attempted to enter.
        cell: Cell,
        /// Final score.
        score: u32,
        /// Final level.
        level: u32,
    },
    /// The pause flag changed.
    PauseChanged {
        /// Whether the simulation is now paused.
        paused: bool,
    },
    /// The autoplay flag changed.
    AutoplayChanged {
        /// Whether autoplay is now enabled.
        enabled: bool,
    },
    /// A fresh game replaced the previous one.
    GameReset,
}

/// Read-only snapshot of everything a renderer or shell needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Playing field dimensions.
    pub grid: Grid,
    /// Snake cells, head first.
    pub snake: Vec<Cell>,
    /// Current heading.
    pub direction: Direction,
    /// Items in insertion order.
    pub items: Vec<Item>,
    /// Obstacle cells in ascending order.
    pub obstacles: Vec<Cell>,
    /// Accumulated score.
    pub score: u32,
    /// Active level.
    pub level: u32,
    /// Interval between ticks.
    pub tick_interval: Duration,
    /// Lifecycle state.
    pub play_state: PlayState,
    /// Whether autoplay chooses directions.
    pub autoplay: bool,
}

/// Tunable parameters for a game. Missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of columns in the grid.
    pub grid_width: u32,
    /// Number of rows in the grid.
    pub grid_height: u32,
    /// Head cell of the snake at the start of a game.
    pub initial_head: Cell,
    /// Number of cells in the snake at the start of a game.
    pub initial_length: u32,
    /// Heading at the start of a game; the body trails behind it.
    pub initial_direction: Direction,
    /// Tick interval at the start of a game, in milliseconds.
    pub initial_interval_ms: u64,
    /// Smallest tick interval speed items can reach, in milliseconds.
    pub min_interval_ms: u64,
    /// Interval reduction applied per speed item, in milliseconds.
    pub interval_step_ms: u64,
    /// Item count that replenishment always restores.
    pub min_items: usize,
    /// Item count that bonus spawns never exceed.
    pub max_items: usize,
    /// Probability of a bonus spawn after an item is consumed.
    pub extra_item_chance: f64,
    /// Score required per level.
    pub score_per_level: u32,
    /// Highest reachable level.
    pub max_level: u32,
    /// Random placement attempts before the spawner scans for free cells.
    pub spawn_attempts: u32,
    /// Seed for the world's random number generator.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_head: Cell::new(10, 10),
            initial_length: 3,
            initial_direction: Direction::Right,
            initial_interval_ms: 150,
            min_interval_ms: 50,
            interval_step_ms: 20,
            min_items: 3,
            max_items: 5,
            extra_item_chance: 0.3,
            score_per_level: 100,
            max_level: 10,
            spawn_attempts: 256,
            rng_seed: 0x5eed_0f5a_a4e5_c0de,
        }
    }
}

impl GameConfig {
    /// Grid described by the configured dimensions.
    #[must_use]
    pub const fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Tick interval at the start of a game.
    #[must_use]
    pub const fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    /// Smallest tick interval speed items can reach.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    /// Interval reduction applied per speed item.
    #[must_use]
    pub const fn interval_step(&self) -> Duration {
        Duration::from_millis(self.interval_step_ms)
    }

    /// Score at which `level` hands over to the next one.
    ///
    /// Thresholds are linear: level `n` is left once the score reaches
    /// `n * score_per_level`.
    #[must_use]
    pub fn level_threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.score_per_level)
    }

    /// Reports whether raising the score from `before` to `after` passes a
    /// level threshold. Passing several thresholds at once still counts once.
    #[must_use]
    pub fn crosses_level_threshold(&self, before: u32, after: u32) -> bool {
        let step = self.score_per_level.max(1);
        after / step > before / step
    }

    /// Snake cells at the start of a game, head first.
    #[must_use]
    pub fn initial_body(&self) -> Vec<Cell> {
        let trailing = self.initial_direction.opposite();
        let mut body = Vec::new();
        let mut cell = self.initial_head;
        for _ in 0..self.initial_length {
            body.push(cell);
            cell = cell.step(trailing);
        }
        body
    }

    /// Checks that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        let cell_count = u64::from(self.grid_width) * u64::from(self.grid_height);
        if self.grid_width > MAX_GRID_SIDE
            || self.grid_height > MAX_GRID_SIDE
            || cell_count > MAX_GRID_CELLS
        {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if u64::from(self.initial_length) > cell_count {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                cells: cell_count,
            });
        }
        let grid = self.grid();
        if let Some(cell) = self
            .initial_body()
            .into_iter()
            .find(|cell| !grid.contains(*cell))
        {
            return Err(ConfigError::SnakeOutOfBounds { cell });
        }
        if self.min_items == 0 {
            return Err(ConfigError::NoItems);
        }
        if self.min_items > self.max_items {
            return Err(ConfigError::ItemBounds {
                min: self.min_items,
                max: self.max_items,
            });
        }
        if !(0.0..=1.0).contains(&self.extra_item_chance) {
            return Err(ConfigError::Probability(self.extra_item_chance));
        }
        if self.min_interval_ms == 0 || self.min_interval_ms > self.initial_interval_ms {
            return Err(ConfigError::IntervalBounds {
                min_ms: self.min_interval_ms,
                initial_ms: self.initial_interval_ms,
            });
        }
        if self.max_level == 0 {
            return Err(ConfigError::NoLevels);
        }
        if self.score_per_level == 0 {
            return Err(ConfigError::ZeroLevelThreshold);
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::ZeroSpawnAttempts);
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The grid exceeds the supported size.
    #[error("grid {width}x{height} exceeds the supported grid size")]
    GridTooLarge {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// The snake would start without any cells.
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    /// The starting snake has more cells than the grid.
    #[error("initial snake length {length} exceeds the {cells} cells of the grid")]
    SnakeTooLong {
        /// Configured length.
        length: u32,
        /// Cells in the grid.
        cells: u64,
    },
    /// Part of the starting snake lies outside the grid.
    #[error("initial snake cell {cell} lies outside the grid")]
    SnakeOutOfBounds {
        /// First offending cell.
        cell: Cell,
    },
    /// The minimum item count is zero.
    #[error("at least one item must be kept on the grid")]
    NoItems,
    /// The minimum item count exceeds the maximum.
    #[error("min_items ({min}) exceeds max_items ({max})")]
    ItemBounds {
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A probability lies outside `[0, 1]`.
    #[error("extra_item_chance must lie in [0, 1], got {0}")]
    Probability(f64),
    /// The interval floor is zero or above the starting interval.
    #[error("min_interval_ms ({min_ms}) must be non-zero and not exceed initial_interval_ms ({initial_ms})")]
    IntervalBounds {
        /// Configured floor.
        min_ms: u64,
        /// Configured starting interval.
        initial_ms: u64,
    },
    /// No level can be reached.
    #[error("max_level must be at least 1")]
    NoLevels,
    /// Every score would trigger a level change.
    #[error("score_per_level must be non-zero")]
    ZeroLevelThreshold,
    /// The spawner would never sample a cell.
    #[error("spawn_attempts must be non-zero")]
    ZeroSpawnAttempts,
}

#[cfg(test)]
mod tests {
    use super::{Cell, ConfigError, Direction, GameConfig, Grid, Item, ItemId, ItemKind};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Cell::new(1, 1);
        let destination = Cell::new(4, 3);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
        assert_eq!(Cell::new(-2, 0).manhattan_distance(Cell::new(2, 0)), 4);
    }

    #[test]
    fn adjacent4_follows_expansion_order() {
        let cell = Cell::new(3, 3);
        assert_eq!(
            cell.adjacent4(),
            [
                Cell::new(3, 2),
                Cell::new(3, 4),
                Cell::new(2, 3),
                Cell::new(4, 3)
            ]
        );
        for neighbor in cell.adjacent4() {
            assert!(cell.is_adjacent_to(neighbor));
        }
    }

    #[test]
    fn opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert!(direction.is_opposite(direction.opposite()));
            assert!(!direction.is_opposite(direction));
        }
        assert!(!Direction::Up.is_opposite(Direction::Left));
    }

    #[test]
    fn direction_between_neighbors() {
        let origin = Cell::new(3, 3);
        assert_eq!(
            Direction::between(origin, Cell::new(3, 2)),
            Some(Direction::Up)
        );
        assert_eq!(
            Direction::between(origin, Cell::new(4, 3)),
            Some(Direction::Right)
        );
        assert_eq!(Direction::between(origin, Cell::new(4, 4)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn grid_bounds_and_indexing() {
        let grid = Grid::new(4, 3);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(3, 2)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(4, 0)));
        assert!(!grid.contains(Cell::new(0, 3)));

        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.index(Cell::new(2, 1)), Some(6));
        assert_eq!(grid.cell_at(6), Some(Cell::new(2, 1)));
        assert_eq!(grid.cell_at(12), None);
        assert_eq!(grid.cells().count(), 12);
        assert_eq!(grid.cells().nth(5), Some(Cell::new(1, 1)));
    }

    #[test]
    fn item_table_matches_cumulative_thresholds() {
        assert_eq!(ItemKind::from_roll(0.0), ItemKind::Apple);
        assert_eq!(ItemKind::from_roll(0.4), ItemKind::Apple);
        assert_eq!(ItemKind::from_roll(0.41), ItemKind::Orange);
        assert_eq!(ItemKind::from_roll(0.61), ItemKind::Grape);
        assert_eq!(ItemKind::from_roll(0.81), ItemKind::Bolt);
        assert_eq!(ItemKind::from_roll(0.999), ItemKind::Bolt);
        assert!(ItemKind::Bolt.affects_speed());
        assert!(!ItemKind::Grape.affects_speed());
        assert_eq!(ItemKind::Bolt.points(), 50);
    }

    #[test]
    fn initial_body_trails_behind_head() {
        let config = GameConfig {
            initial_head: Cell::new(5, 5),
            initial_direction: Direction::Right,
            initial_length: 3,
            ..GameConfig::default()
        };
        assert_eq!(
            config.initial_body(),
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_snake_outside_grid() {
        let config = GameConfig {
            initial_head: Cell::new(1, 1),
            initial_direction: Direction::Right,
            initial_length: 4,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeOutOfBounds {
                cell: Cell::new(-1, 1)
            })
        );
    }

    #[test]
    fn validation_rejects_inverted_item_bounds() {
        let config = GameConfig {
            min_items: 6,
            max_items: 5,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ItemBounds { min: 6, max: 5 })
        );
    }

    #[test]
    fn level_thresholds_are_linear() {
        let config = GameConfig::default();
        assert_eq!(config.level_threshold(1), 100);
        assert_eq!(config.level_threshold(4), 400);
        assert!(config.crosses_level_threshold(90, 100));
        assert!(config.crosses_level_threshold(290, 340));
        assert!(config.crosses_level_threshold(0, 350));
        assert!(!config.crosses_level_threshold(100, 190));
        assert!(!config.crosses_level_threshold(340, 340));
    }

    #[test]
    fn validation_rejects_oversized_grid() {
        let config = GameConfig {
            grid_width: u32::MAX,
            grid_height: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooLarge {
                width: u32::MAX,
                height: u32::MAX,
            })
        );

        let wide = GameConfig {
            grid_width: 2_000_000,
            grid_height: 2_000_000,
            ..GameConfig::default()
        };
        assert!(matches!(
            wide.validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));

        let largest = GameConfig {
            grid_width: 1024,
            grid_height: 1024,
            ..GameConfig::default()
        };
        assert_eq!(largest.validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_snake_longer_than_grid() {
        let config = GameConfig {
            grid_width: 4,
            grid_height: 4,
            initial_head: Cell::new(3, 0),
            initial_length: u32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeTooLong {
                length: u32::MAX,
                cells: 16,
            })
        );
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config: GameConfig = toml::from_str(
            "grid_width = 20\ngrid_height = 20\ninitial_direction = \"Down\"\n",
        )
        .expect("config parses");
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.initial_direction, Direction::Down);
        assert_eq!(config.min_items, GameConfig::default().min_items);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn item_round_trips_through_bincode() {
        assert_round_trip(&Item {
            id: ItemId::new(7),
            cell: Cell::new(3, 9),
            kind: ItemKind::Grape,
        });
    }
}
