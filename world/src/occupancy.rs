//! Dense per-cell masks backing collision and placement checks.

use snake_arena_core::{Cell, Grid};

/// Row-major masks marking snake and obstacle cells.
///
/// Cells outside the grid are never reported as occupied; callers check
/// bounds separately.
#[derive(Clone, Debug)]
pub(crate) struct Occupancy {
    grid: Grid,
    snake: Vec<bool>,
    obstacles: Vec<bool>,
}

impl Occupancy {
    pub(crate) fn new(grid: Grid) -> Self {
        let cell_count = grid.cell_count();
        Self {
            grid,
            snake: vec![false; cell_count],
            obstacles: vec![false; cell_count],
        }
    }

    pub(crate) fn fill_snake(&mut self, cells: impl Iterator<Item = Cell>) {
        self.snake.fill(false);
        for cell in cells {
            self.occupy_snake(cell);
        }
    }

    pub(crate) fn fill_obstacles<'a>(&mut self, cells: impl Iterator<Item = &'a Cell>) {
        self.obstacles.fill(false);
        for cell in cells {
            if let Some(index) = self.grid.index(*cell) {
                self.obstacles[index] = true;
            }
        }
    }

    pub(crate) fn occupy_snake(&mut self, cell: Cell) {
        if let Some(index) = self.grid.index(cell) {
            self.snake[index] = true;
        }
    }

    pub(crate) fn vacate_snake(&mut self, cell: Cell) {
        if let Some(index) = self.grid.index(cell) {
            self.snake[index] = false;
        }
    }

    pub(crate) fn is_snake(&self, cell: Cell) -> bool {
        self.grid.index(cell).map_or(false, |index| self.snake[index])
    }

    pub(crate) fn is_obstacle(&self, cell: Cell) -> bool {
        self.grid
            .index(cell)
            .map_or(false, |index| self.obstacles[index])
    }

    /// Reports snake or obstacle cells, the set autoplay routes around.
    pub(crate) fn is_blocked(&self, cell: Cell) -> bool {
        self.is_snake(cell) || self.is_obstacle(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_snake_and_obstacles_separately() {
        let mut occupancy = Occupancy::new(Grid::new(4, 4));
        occupancy.fill_snake([Cell::new(0, 0), Cell::new(1, 0)].into_iter());
        occupancy.fill_obstacles([Cell::new(3, 3), Cell::new(9, 9)].iter());

        assert!(occupancy.is_snake(Cell::new(1, 0)));
        assert!(!occupancy.is_obstacle(Cell::new(1, 0)));
        assert!(occupancy.is_obstacle(Cell::new(3, 3)));
        assert!(occupancy.is_blocked(Cell::new(3, 3)));
        assert!(!occupancy.is_blocked(Cell::new(-1, 0)));

        occupancy.vacate_snake(Cell::new(0, 0));
        assert!(!occupancy.is_snake(Cell::new(0, 0)));
    }
}
