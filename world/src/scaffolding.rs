//! Direct state manipulation for scenario tests.
//!
//! These helpers bypass [`crate::apply`] and therefore emit no events. They
//! keep the occupancy masks consistent with the state they write.

use snake_arena_core::{Cell, Direction, Item, ItemId, ItemKind};
use snake_arena_system_layout::obstacles_for_level;

use crate::{snake::Snake, World};

/// Replaces the snake body (head first) and its heading.
pub fn place_snake(world: &mut World, body: Vec<Cell>, direction: Direction) {
    world.snake = Snake::new(body);
    world.occupancy.fill_snake(world.snake.cells());
    world.direction = direction;
    world.pending_direction = None;
}

/// Adds an item of `kind` at `cell` and returns its identifier.
pub fn place_item(world: &mut World, cell: Cell, kind: ItemKind) -> ItemId {
    let id = ItemId::new(world.next_item_id);
    world.next_item_id += 1;
    world.items.push(Item { id, cell, kind });
    id
}

/// Removes every item from the grid.
pub fn clear_items(world: &mut World) {
    world.items.clear();
}

/// Replaces the obstacle set.
pub fn set_obstacles(world: &mut World, cells: impl IntoIterator<Item = Cell>) {
    world.obstacles = cells.into_iter().collect();
    world.occupancy.fill_obstacles(world.obstacles.iter());
}

/// Overwrites the score without triggering level changes.
pub fn set_score(world: &mut World, score: u32) {
    world.score = score;
}

/// Switches to `level` and installs its obstacle layout.
pub fn set_level(world: &mut World, level: u32) {
    world.level = level;
    world.obstacles = obstacles_for_level(world.grid, level, world.config.max_level);
    world.occupancy.fill_obstacles(world.obstacles.iter());
}
