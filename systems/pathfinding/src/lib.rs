#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! A* search over the 4-connected game grid.
//!
//! The search uses the Manhattan distance as its heuristic, which is both
//! admissible and consistent on a uniform-cost 4-connected grid, so the first
//! time the goal is popped from the frontier the path is optimal.
//!
//! Ties between frontier entries with equal `f = g + h` are broken by
//! insertion order: the entry pushed first is expanded first. Neighbours are
//! pushed in `Up, Down, Left, Right` order, which makes the chosen path among
//! several optimal ones fully deterministic. Improving an open entry pushes a
//! fresh entry instead of updating the old one in place; the stale entry is
//! discarded when it surfaces because its cell is already closed.
//!
//! "No path" is an ordinary outcome reported as `None`.

use std::{cmp::Reverse, collections::BinaryHeap};

use snake_arena_core::{Cell, Grid};

/// Reusable A* workspace.
///
/// The dense scratch buffers are sized to the grid on each search and reused
/// between searches, so a long-lived pathfinder does not allocate per tick.
#[derive(Debug, Default)]
pub struct Pathfinder {
    cost: Vec<u32>,
    parent: Vec<Option<usize>>,
    closed: Vec<bool>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    sequence: u64,
    expanded: usize,
}

impl Pathfinder {
    /// Creates a pathfinder with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells expanded by the most recent search.
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Finds a shortest path from `start` to `goal`, both inclusive.
    ///
    /// A neighbour is rejected when it lies outside `grid`, has already been
    /// expanded, or `is_blocked` reports it as blocked. The start cell itself
    /// is never tested against `is_blocked`, since it is normally the snake's
    /// own head. Returns `None` when either endpoint lies outside the grid or
    /// the frontier empties without reaching the goal.
    pub fn find_path<F>(
        &mut self,
        grid: Grid,
        start: Cell,
        goal: Cell,
        is_blocked: F,
    ) -> Option<Vec<Cell>>
    where
        F: Fn(Cell) -> bool,
    {
        let start_index = grid.index(start)?;
        let goal_index = grid.index(goal)?;

        self.prepare(grid.cell_count());
        self.cost[start_index] = 0;
        self.push(start_index, start.manhattan_distance(goal));

        while let Some(Reverse(entry)) = self.frontier.pop() {
            let index = entry.index;
            if self.closed[index] {
                continue;
            }

            if index == goal_index {
                return Some(self.reconstruct(grid, goal_index));
            }

            self.closed[index] = true;
            self.expanded += 1;

            let Some(cell) = grid.cell_at(index) else {
                continue;
            };
            let next_cost = self.cost[index].saturating_add(1);

            for neighbor in cell.adjacent4() {
                let Some(neighbor_index) = grid.index(neighbor) else {
                    continue;
                };
                if self.closed[neighbor_index] || is_blocked(neighbor) {
                    continue;
                }
                if next_cost >= self.cost[neighbor_index] {
                    continue;
                }

                self.cost[neighbor_index] = next_cost;
                self.parent[neighbor_index] = Some(index);
                let estimate = next_cost.saturating_add(neighbor.manhattan_distance(goal));
                self.push(neighbor_index, estimate);
            }
        }

        None
    }

    fn prepare(&mut self, cell_count: usize) {
        if self.cost.len() != cell_count {
            self.cost = vec![u32::MAX; cell_count];
            self.parent = vec![None; cell_count];
            self.closed = vec![false; cell_count];
        } else {
            self.cost.fill(u32::MAX);
            self.parent.fill(None);
            self.closed.fill(false);
        }
        self.frontier.clear();
        self.sequence = 0;
        self.expanded = 0;
    }

    fn push(&mut self, index: usize, estimate: u32) {
        self.frontier.push(Reverse(FrontierEntry {
            estimate,
            sequence: self.sequence,
            index,
        }));
        self.sequence += 1;
    }

    fn reconstruct(&self, grid: Grid, goal_index: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut cursor = Some(goal_index);
        while let Some(index) = cursor {
            if let Some(cell) = grid.cell_at(index) {
                path.push(cell);
            }
            cursor = self.parent[index];
        }
        path.reverse();
        path
    }
}

/// Finds a shortest path using a throwaway [`Pathfinder`].
pub fn find_path<F>(grid: Grid, start: Cell, goal: Cell, is_blocked: F) -> Option<Vec<Cell>>
where
    F: Fn(Cell) -> bool,
{
    Pathfinder::new().find_path(grid, start, goal, is_blocked)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    estimate: u32,
    sequence: u64,
    index: usize,
}
