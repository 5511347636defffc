//! Ordered snake body owned by the world.

use std::collections::VecDeque;

use snake_arena_core::Cell;

/// Snake cells stored head first.
///
/// The head is prepended on every successful step and the tail is popped
/// unless the step consumed an item.
#[derive(Clone, Debug)]
pub(crate) struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    pub(crate) fn new(cells: Vec<Cell>) -> Self {
        Self { body: cells.into() }
    }

    pub(crate) fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        self.body.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_by_prepending_and_popping() {
        let mut snake = Snake::new(vec![Cell::new(2, 0), Cell::new(1, 0), Cell::new(0, 0)]);
        snake.push_head(Cell::new(3, 0));
        assert_eq!(snake.pop_tail(), Some(Cell::new(0, 0)));
        assert_eq!(snake.head(), Some(Cell::new(3, 0)));
        assert_eq!(snake.len(), 3);
        assert_eq!(
            snake.to_vec(),
            vec![Cell::new(3, 0), Cell::new(2, 0), Cell::new(1, 0)]
        );
    }
}
