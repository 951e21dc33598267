//! Overlap tests between cells.  Since everything lives on the same grid, two
//! things collide exactly when they occupy the same cell.
use super::arena::Arena;
use super::snake::Snake;
use ratatui::layout::Position;

pub(crate) fn overlaps(a: Position, b: Position) -> bool {
    a == b
}

pub(crate) fn head_vs_food(head: Position, food: Position) -> bool {
    overlaps(head, food)
}

/// Has the snake's head run into the rest of its body?
pub(crate) fn head_vs_body(snake: &Snake) -> bool {
    let head = snake.head();
    snake.body().iter().any(|&p| overlaps(head, p))
}

/// Has the snake's head left the interior of the arena?
pub(crate) fn head_vs_border(head: Position, arena: Arena) -> bool {
    !arena.in_interior(head)
}
