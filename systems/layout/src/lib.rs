#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic obstacle layouts keyed by level.
//!
//! Every layout is a pure function of the grid dimensions. Nothing here looks
//! at the snake or the items, so a level always produces the same obstacles on
//! the same grid. Each rule carves hard-coded gaps into its walls, and cells
//! that would fall outside the grid are dropped, so small grids simply receive
//! a partial layout.

use std::collections::BTreeSet;

use snake_arena_core::{Cell, Grid};

/// Named obstacle patterns, one per level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layout {
    /// No obstacles at all.
    Open,
    /// A single bar across the middle row.
    HorizontalBar,
    /// Two vertical bars near the left and right edges.
    TwoVerticalBars,
    /// A box with a three-cell opening in the middle of every side.
    BoxWithOpenings,
    /// A plus sign with its centre removed.
    Cross,
    /// Two crossing diagonals, each perforated every third cell.
    DiagonalCorridors,
    /// Vertical walls with an opening around the middle row.
    MazeCorridors,
    /// An outer box and a partial inner box, both with wide openings.
    Spiral,
    /// A lattice of 2x2 pillars.
    PillarField,
    /// Perforated horizontal and vertical barriers.
    ComplexMaze,
}

impl Layout {
    /// Layout used by `level` once it is clamped to `[1, max_level]`.
    ///
    /// Levels beyond the tenth reuse [`Layout::ComplexMaze`].
    #[must_use]
    pub fn for_level(level: u32, max_level: u32) -> Self {
        match clamp_level(level, max_level) {
            1 => Self::Open,
            2 => Self::HorizontalBar,
            3 => Self::TwoVerticalBars,
            4 => Self::BoxWithOpenings,
            5 => Self::Cross,
            6 => Self::DiagonalCorridors,
            7 => Self::MazeCorridors,
            8 => Self::Spiral,
            9 => Self::PillarField,
            _ => Self::ComplexMaze,
        }
    }

    /// Human-readable name of the pattern.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open field",
            Self::HorizontalBar => "horizontal bar",
            Self::TwoVerticalBars => "two vertical bars",
            Self::BoxWithOpenings => "box with openings",
            Self::Cross => "cross",
            Self::DiagonalCorridors => "diagonal corridors",
            Self::MazeCorridors => "maze corridors",
            Self::Spiral => "spiral",
            Self::PillarField => "pillar field",
            Self::ComplexMaze => "complex maze",
        }
    }

    /// Builds the obstacle cells of this pattern on `grid`.
    #[must_use]
    pub fn obstacles(self, grid: Grid) -> BTreeSet<Cell> {
        let mut walls = Walls::new(grid);
        let width = walls.width;
        let height = walls.height;
        let mid_x = width / 2;
        let mid_y = height / 2;

        match self {
            Self::Open => {}
            Self::HorizontalBar => {
                for x in 5..width - 5 {
                    walls.push(x, mid_y);
                }
            }
            Self::TwoVerticalBars => {
                for y in 5..height - 5 {
                    walls.push(8, y);
                    walls.push(width - 9, y);
                }
            }
            Self::BoxWithOpenings => {
                for x in 8..width - 8 {
                    if x.abs_diff(mid_x) > 1 {
                        walls.push(x, 8);
                        walls.push(x, height - 9);
                    }
                }
                for y in 8..height - 8 {
                    if y.abs_diff(mid_y) > 1 {
                        walls.push(8, y);
                        walls.push(width - 9, y);
                    }
                }
            }
            Self::Cross => {
                for x in 5..width - 5 {
                    if x.abs_diff(mid_x) > 1 {
                        walls.push(x, mid_y);
                    }
                }
                for y in 5..height - 5 {
                    if y.abs_diff(mid_y) > 1 {
                        walls.push(mid_x, y);
                    }
                }
            }
            Self::DiagonalCorridors => {
                let span = width.min(height);
                for i in 5..span - 5 {
                    if i % 3 != 0 {
                        walls.push(i, i);
                    }
                    if i % 3 != 1 {
                        walls.push(width - 1 - i, i);
                    }
                }
            }
            Self::MazeCorridors => {
                for x in (10..width - 10).step_by(6) {
                    for y in 3..height - 3 {
                        if y < mid_y - 2 || y > mid_y + 2 {
                            walls.push(x, y);
                        }
                    }
                }
            }
            Self::Spiral => {
                let inset = 8;
                for x in inset..width - inset {
                    if x < mid_x - 3 || x > mid_x + 3 {
                        walls.push(x, inset);
                        walls.push(x, height - inset - 1);
                    }
                }
                for y in inset..height - inset {
                    if y < mid_y - 3 || y > mid_y + 3 {
                        walls.push(inset, y);
                        walls.push(width - inset - 1, y);
                    }
                }
                for x in inset + 4..width - inset - 4 {
                    if x < mid_x - 2 || x > mid_x + 2 {
                        walls.push(x, inset + 4);
                        walls.push(x, height - inset - 5);
                    }
                }
            }
            Self::PillarField => {
                for x in (8..width - 8).step_by(8) {
                    for y in (6..height - 6).step_by(6) {
                        walls.push(x, y);
                        walls.push(x + 1, y);
                        walls.push(x, y + 1);
                        walls.push(x + 1, y + 1);
                    }
                }
            }
            Self::ComplexMaze => {
                for y in (8..height - 8).step_by(6) {
                    for x in 5..width - 5 {
                        if x % 8 < 5 {
                            walls.push(x, y);
                        }
                    }
                }
                for x in (12..width - 12).step_by(10) {
                    for y in 5..height - 5 {
                        if y % 7 < 4 {
                            walls.push(x, y);
                        }
                    }
                }
            }
        }

        walls.into_cells()
    }
}

/// Clamps a level into `[1, max_level]`, treating a zero maximum as one.
#[must_use]
pub fn clamp_level(level: u32, max_level: u32) -> u32 {
    level.clamp(1, max_level.max(1))
}

/// Obstacles for `level` on `grid`, with the level clamped to `[1, max_level]`.
#[must_use]
pub fn obstacles_for_level(grid: Grid, level: u32, max_level: u32) -> BTreeSet<Cell> {
    Layout::for_level(level, max_level).obstacles(grid)
}

struct Walls {
    grid: Grid,
    width: i32,
    height: i32,
    cells: BTreeSet<Cell>,
}

impl Walls {
    fn new(grid: Grid) -> Self {
        Self {
            grid,
            width: i32::try_from(grid.width()).unwrap_or(i32::MAX),
            height: i32::try_from(grid.height()).unwrap_or(i32::MAX),
            cells: BTreeSet::new(),
        }
    }

    fn push(&mut self, x: i32, y: i32) {
        let cell = Cell::new(x, y);
        if self.grid.contains(cell) {
            let _ = self.cells.insert(cell);
        }
    }

    fn into_cells(self) -> BTreeSet<Cell> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LAYOUTS: [Layout; 10] = [
        Layout::Open,
        Layout::HorizontalBar,
        Layout::TwoVerticalBars,
        Layout::BoxWithOpenings,
        Layout::Cross,
        Layout::DiagonalCorridors,
        Layout::MazeCorridors,
        Layout::Spiral,
        Layout::PillarField,
        Layout::ComplexMaze,
    ];

    fn default_grid() -> Grid {
        Grid::new(40, 30)
    }

    #[test]
    fn first_level_is_open() {
        assert!(obstacles_for_level(default_grid(), 1, 10).is_empty());
    }

    #[test]
    fn levels_are_clamped() {
        assert_eq!(Layout::for_level(0, 10), Layout::Open);
        assert_eq!(Layout::for_level(42, 10), Layout::ComplexMaze);
        assert_eq!(Layout::for_level(9, 4), Layout::BoxWithOpenings);
        assert_eq!(Layout::for_level(3, 0), Layout::Open);
        assert_eq!(clamp_level(7, 5), 5);
    }

    #[test]
    fn layouts_are_reproducible() {
        for level in 1..=10 {
            assert_eq!(
                obstacles_for_level(default_grid(), level, 10),
                obstacles_for_level(default_grid(), level, 10),
                "level {level} diverged"
            );
        }
    }

    #[test]
    fn horizontal_bar_spans_middle_row() {
        let cells = Layout::HorizontalBar.obstacles(default_grid());
        assert_eq!(cells.len(), 30);
        assert!(cells.iter().all(|cell| cell.y() == 15));
        assert!(cells.contains(&Cell::new(5, 15)));
        assert!(cells.contains(&Cell::new(34, 15)));
        assert!(!cells.contains(&Cell::new(35, 15)));
    }

    #[test]
    fn cross_leaves_centre_open() {
        let cells = Layout::Cross.obstacles(default_grid());
        for dx in -1..=1 {
            assert!(!cells.contains(&Cell::new(20 + dx, 15)));
        }
        for dy in -1..=1 {
            assert!(!cells.contains(&Cell::new(20, 15 + dy)));
        }
        assert!(cells.contains(&Cell::new(18, 15)));
        assert!(cells.contains(&Cell::new(20, 13)));
    }

    #[test]
    fn box_has_openings_on_every_side() {
        let cells = Layout::BoxWithOpenings.obstacles(default_grid());
        assert!(!cells.contains(&Cell::new(20, 8)));
        assert!(!cells.contains(&Cell::new(20, 21)));
        assert!(!cells.contains(&Cell::new(8, 15)));
        assert!(!cells.contains(&Cell::new(31, 15)));
        assert!(cells.contains(&Cell::new(8, 8)));
        assert!(cells.contains(&Cell::new(31, 21)));
    }

    #[test]
    fn pillars_are_two_by_two() {
        let cells = Layout::PillarField.obstacles(default_grid());
        assert_eq!(cells.len() % 4, 0);
        for cell in [
            Cell::new(8, 6),
            Cell::new(9, 6),
            Cell::new(8, 7),
            Cell::new(9, 7),
        ] {
            assert!(cells.contains(&cell));
        }
    }

    #[test]
    fn every_layout_leaves_free_space_inside_the_grid() {
        for grid in [default_grid(), Grid::new(20, 20), Grid::new(7, 5), Grid::new(1, 1)] {
            for layout in ALL_LAYOUTS {
                let cells = layout.obstacles(grid);
                assert!(
                    cells.len() < grid.cell_count(),
                    "{} blocks every cell of {grid:?}",
                    layout.label()
                );
                assert!(cells.iter().all(|cell| grid.contains(*cell)));
            }
        }
    }

    #[test]
    fn outer_ring_stays_open() {
        let grid = default_grid();
        for layout in ALL_LAYOUTS {
            let cells = layout.obstacles(grid);
            for x in 0..40 {
                assert!(!cells.contains(&Cell::new(x, 0)), "{}", layout.label());
                assert!(!cells.contains(&Cell::new(x, 29)), "{}", layout.label());
            }
        }
    }
}
