#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Autoplay policy that steers the snake toward the nearest item.
//!
//! Each decision routes the head to the item closest by Manhattan distance
//! using A*. When no item exists or no route reaches the chosen item, the
//! policy falls back to a one-step lookahead that prefers the safe neighbour
//! with the most safe cells around it. If every candidate is unsafe the
//! current heading is kept, even though it leads into a collision.

use std::collections::BTreeSet;

use snake_arena_core::{Cell, Direction, Grid, Item};
use snake_arena_system_pathfinding::Pathfinder;
use tracing::debug;

/// Heading chosen by the policy together with the reason it was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Heading to apply on the next tick.
    pub direction: Direction,
    /// Item cell the heading routes toward, absent for fallback decisions.
    pub target: Option<Cell>,
    /// Indicates whether the safety heuristic produced the heading.
    pub fallback: bool,
}

/// Autoplay system owning a reusable pathfinding workspace.
#[derive(Debug, Default)]
pub struct Autoplay {
    pathfinder: Pathfinder,
}

impl Autoplay {
    /// Creates a new autoplay system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses the heading for the snake whose cells are `body`, head first.
    ///
    /// `is_blocked` must report every snake and obstacle cell. Cells outside
    /// `grid` are always treated as unsafe.
    pub fn decide<F>(
        &mut self,
        grid: Grid,
        body: &[Cell],
        items: &[Item],
        current: Direction,
        is_blocked: F,
    ) -> Decision
    where
        F: Fn(Cell) -> bool,
    {
        let Some(&head) = body.first() else {
            return Decision {
                direction: current,
                target: None,
                fallback: true,
            };
        };

        let candidates = items.iter().filter(|item| !is_blocked(item.cell));
        if let Some(target) = nearest_item(head, candidates) {
            let route = self
                .pathfinder
                .find_path(grid, head, target, &is_blocked)
                .and_then(|path| path.get(1).copied())
                .and_then(|step| Direction::between(head, step));
            if let Some(direction) = route {
                debug!(?direction, %target, expanded = self.pathfinder.expanded(), "autoplay routed");
                return Decision {
                    direction,
                    target: Some(target),
                    fallback: false,
                };
            }
            debug!(%target, "no route to nearest item");
        }

        let direction = safest_direction(head, current, |cell| {
            grid.contains(cell) && !is_blocked(cell)
        });
        debug!(?direction, "autoplay fell back to safety heuristic");
        Decision {
            direction,
            target: None,
            fallback: true,
        }
    }
}

/// Cell of the item closest to `head`; the earliest item wins ties.
#[must_use]
pub fn nearest_item<'a>(head: Cell, items: impl IntoIterator<Item = &'a Item>) -> Option<Cell> {
    items
        .into_iter()
        .min_by_key(|item| head.manhattan_distance(item.cell))
        .map(|item| item.cell)
}

/// Picks the non-reversing heading whose next cell has the most safe neighbours.
///
/// Candidates are scored in `Up, Down, Left, Right` order and only a strictly
/// higher score replaces the best so far. `current` is returned when no
/// candidate cell is safe.
pub fn safest_direction<F>(head: Cell, current: Direction, is_safe: F) -> Direction
where
    F: Fn(Cell) -> bool,
{
    let mut best = current;
    let mut best_openness: Option<usize> = None;

    for direction in Direction::ALL {
        if direction == current.opposite() {
            continue;
        }
        let next = head.step(direction);
        if !is_safe(next) {
            continue;
        }
        let openness = next
            .adjacent4()
            .into_iter()
            .filter(|neighbor| is_safe(*neighbor))
            .count();
        if best_openness.map_or(true, |score| openness > score) {
            best_openness = Some(openness);
            best = direction;
        }
    }

    best
}

/// One-shot decision treating `body` and `obstacles` as blocked.
pub fn next_direction(
    grid: Grid,
    body: &[Cell],
    items: &[Item],
    obstacles: &BTreeSet<Cell>,
    current: Direction,
) -> Direction {
    let occupied: BTreeSet<Cell> = body.iter().copied().collect();
    Autoplay::new()
        .decide(grid, body, items, current, |cell| {
            occupied.contains(&cell) || obstacles.contains(&cell)
        })
        .direction
}

#[cfg(test)]
mod tests {
    use snake_arena_core::{ItemId, ItemKind};

    use super::*;

    fn apple(id: u64, x: i32, y: i32) -> Item {
        Item {
            id: ItemId::new(id),
            cell: Cell::new(x, y),
            kind: ItemKind::Apple,
        }
    }

    fn straight_body() -> Vec<Cell> {
        vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
    }

    #[test]
    fn routes_straight_toward_item_ahead() {
        let body = straight_body();
        let decision = Autoplay::new().decide(
            Grid::new(10, 10),
            &body,
            &[apple(1, 8, 5)],
            Direction::Right,
            |cell| body.contains(&cell),
        );
        assert_eq!(
            decision,
            Decision {
                direction: Direction::Right,
                target: Some(Cell::new(8, 5)),
                fallback: false,
            }
        );
    }

    #[test]
    fn nearest_item_prefers_first_on_ties() {
        let items = [apple(1, 5, 8), apple(2, 8, 5), apple(3, 0, 0)];
        assert_eq!(nearest_item(Cell::new(5, 5), &items), Some(Cell::new(5, 8)));
        assert_eq!(nearest_item(Cell::new(5, 5), &[] as &[Item]), None);

        let body = straight_body();
        let direction = next_direction(
            Grid::new(10, 10),
            &body,
            &items,
            &BTreeSet::new(),
            Direction::Right,
        );
        assert_eq!(direction, Direction::Down);
    }

    #[test]
    fn detours_around_obstacle_in_front() {
        let obstacles: BTreeSet<Cell> = [Cell::new(6, 5)].into_iter().collect();
        let direction = next_direction(
            Grid::new(10, 10),
            &straight_body(),
            &[apple(1, 8, 5)],
            &obstacles,
            Direction::Right,
        );
        assert!(matches!(direction, Direction::Up | Direction::Down));
    }

    #[test]
    fn without_items_uses_safety_heuristic() {
        let body = straight_body();
        let decision = Autoplay::new().decide(
            Grid::new(10, 10),
            &body,
            &[],
            Direction::Right,
            |cell| body.contains(&cell),
        );
        assert_eq!(
            decision,
            Decision {
                direction: Direction::Up,
                target: None,
                fallback: true,
            }
        );
    }

    #[test]
    fn unreachable_item_falls_back() {
        let body = straight_body();
        let walls = [Cell::new(1, 0), Cell::new(0, 1)];
        let decision = Autoplay::new().decide(
            Grid::new(10, 10),
            &body,
            &[apple(1, 0, 0)],
            Direction::Right,
            |cell| body.contains(&cell) || walls.contains(&cell),
        );
        assert!(decision.fallback);
        assert_eq!(decision.target, None);
    }

    #[test]
    fn skips_items_buried_under_obstacles() {
        let obstacles: BTreeSet<Cell> = [Cell::new(7, 5)].into_iter().collect();
        let body = straight_body();
        let decision = Autoplay::new().decide(
            Grid::new(10, 10),
            &body,
            &[apple(1, 7, 5), apple(2, 5, 8)],
            Direction::Right,
            |cell| body.contains(&cell) || obstacles.contains(&cell),
        );
        assert_eq!(
            decision,
            Decision {
                direction: Direction::Down,
                target: Some(Cell::new(5, 8)),
                fallback: false,
            }
        );
    }

    #[test]
    fn fallback_prefers_more_open_neighbour() {
        let grid = Grid::new(5, 5);
        let body = [Cell::new(0, 1), Cell::new(1, 1), Cell::new(2, 1)];
        let direction = safest_direction(body[0], Direction::Left, |cell| {
            grid.contains(cell) && !body.contains(&cell)
        });
        assert_eq!(direction, Direction::Down);
    }

    #[test]
    fn keeps_heading_when_every_move_is_fatal() {
        let grid = Grid::new(3, 1);
        let body = [Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)];
        let direction = next_direction(grid, &body, &[], &BTreeSet::new(), Direction::Right);
        assert_eq!(direction, Direction::Right);
    }

    #[test]
    fn never_chooses_reversal_in_fallback() {
        let direction = safest_direction(Cell::new(2, 2), Direction::Up, |_| true);
        assert_ne!(direction, Direction::Down);
        assert_eq!(direction, Direction::Up);
    }

    #[test]
    fn empty_body_keeps_current_heading() {
        let decision =
            Autoplay::new().decide(Grid::new(4, 4), &[], &[apple(1, 1, 1)], Direction::Left, |_| false);
        assert_eq!(decision.direction, Direction::Left);
        assert!(decision.fallback);
    }
}
