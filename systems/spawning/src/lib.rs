#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Item placement by bounded rejection sampling.
//!
//! The spawner samples uniformly random cells until it finds one the caller
//! reports as free. After a configurable number of misses it stops sampling,
//! scans the grid for the remaining free cells, and picks one of those
//! uniformly instead. A full grid is reported as [`SpawnError::NoFreeCell`], so
//! placement always terminates.

use rand::Rng;
use snake_arena_core::{Cell, Grid, ItemKind};
use thiserror::Error;
use tracing::{debug, warn};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    attempts: u32,
}

impl Config {
    /// Creates a new configuration allowing `attempts` random samples per placement.
    #[must_use]
    pub const fn new(attempts: u32) -> Self {
        Self { attempts }
    }

    /// Random samples drawn before falling back to a scan.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// How a placement was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementMethod {
    /// A random sample hit a free cell.
    Sampled {
        /// Number of samples drawn, including the successful one.
        attempts: u32,
    },
    /// Sampling gave up and the cell was picked from a scan of free cells.
    Scanned {
        /// Number of free cells the scan found.
        free_cells: usize,
    },
}

/// Cell and kind chosen for a new item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Free cell the item should occupy.
    pub cell: Cell,
    /// Kind rolled from the spawn table.
    pub kind: ItemKind,
    /// How the cell was found.
    pub method: PlacementMethod,
}

/// Reasons a placement can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Every cell of the grid is occupied.
    #[error("no free cell remains on the {width}x{height} grid")]
    NoFreeCell {
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

/// Item placement system with a reusable scan buffer.
#[derive(Debug)]
pub struct Spawning {
    attempts: u32,
    free_cells: Vec<Cell>,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            attempts: config.attempts(),
            free_cells: Vec::new(),
        }
    }

    /// Chooses a free cell and an item kind.
    ///
    /// `is_occupied` must report every cell covered by the snake, the
    /// obstacles, and existing items, including items placed earlier in the
    /// same tick.
    pub fn spawn<R, F>(
        &mut self,
        rng: &mut R,
        grid: Grid,
        is_occupied: F,
    ) -> Result<Placement, SpawnError>
    where
        R: Rng,
        F: Fn(Cell) -> bool,
    {
        let no_free_cell = SpawnError::NoFreeCell {
            width: grid.width(),
            height: grid.height(),
        };
        if grid.cell_count() == 0 {
            return Err(no_free_cell);
        }

        for attempt in 1..=self.attempts {
            let cell = sample_cell(rng, grid);
            if !is_occupied(cell) {
                let kind = roll_kind(rng);
                return Ok(Placement {
                    cell,
                    kind,
                    method: PlacementMethod::Sampled { attempts: attempt },
                });
            }
        }

        self.free_cells.clear();
        self.free_cells
            .extend(grid.cells().filter(|cell| !is_occupied(*cell)));
        if self.free_cells.is_empty() {
            warn!(
                width = grid.width(),
                height = grid.height(),
                "no free cell left for an item"
            );
            return Err(no_free_cell);
        }

        let free_cells = self.free_cells.len();
        let cell = self.free_cells[rng.gen_range(0..free_cells)];
        debug!(
            attempts = self.attempts,
            free_cells, "random placement exhausted, picked from scan"
        );
        let kind = roll_kind(rng);
        Ok(Placement {
            cell,
            kind,
            method: PlacementMethod::Scanned { free_cells },
        })
    }
}

/// Rolls an item kind from the cumulative spawn table.
pub fn roll_kind<R: Rng>(rng: &mut R) -> ItemKind {
    ItemKind::from_roll(rng.gen::<f64>())
}

fn sample_cell<R: Rng>(rng: &mut R, grid: Grid) -> Cell {
    let x = rng.gen_range(0..grid.width());
    let y = rng.gen_range(0..grid.height());
    Cell::new(
        i32::try_from(x).unwrap_or(i32::MAX),
        i32::try_from(y).unwrap_or(i32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn empty_grid_reports_no_free_cell() {
        let mut spawning = Spawning::new(Config::new(4));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(
            spawning.spawn(&mut rng, Grid::new(0, 5), |_| false),
            Err(SpawnError::NoFreeCell {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn sampled_cells_stay_inside_grid() {
        let grid = Grid::new(3, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            assert!(grid.contains(sample_cell(&mut rng, grid)));
        }
    }
}
