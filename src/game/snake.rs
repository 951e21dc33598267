use super::direction::{is_opposite, Direction};
use crate::consts;
use ratatui::layout::Position;

/// Placeholder coordinate for a segment added by [`Snake::grow()`].  It lies
/// outside any arena, so it can never register a collision before the next
/// [`Snake::walk()`] shifts a real position into it.
pub(crate) const GROWTH_SENTINEL: Position = Position {
    x: u16::MAX,
    y: u16::MAX,
};

/// The snake: where its cells are and which way it is heading
///
/// All positions are relative to the top-left corner of the arena.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The positions of all of the cells in the snake, head first.  Never
    /// empty.
    pub(super) cells: Vec<Position>,

    /// The direction in which the snake last moved (or is facing, if it hasn't
    /// moved yet)
    pub(super) direction: Direction,

    /// The direction in which the snake will move on the next walk
    pub(super) next_direction: Direction,
}

impl Snake {
    /// Create a new snake of `length` cells (at least one), all stacked at
    /// `start` and facing right.
    pub(crate) fn new(start: Position, length: usize) -> Snake {
        Snake {
            cells: vec![start; length.max(1)],
            direction: Direction::Right,
            next_direction: Direction::Right,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.cells[0]
    }

    /// Return the positions of the cells behind the head
    pub(crate) fn body(&self) -> &[Position] {
        &self.cells[1..]
    }

    /// Return the positions of all of the snake's cells, head first
    pub(crate) fn cells(&self) -> &[Position] {
        &self.cells
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        }
    }

    /// Ask the snake to move in `direction` on its next walk.  Turning back on
    /// itself is refused; returns `false` in that case.
    pub(crate) fn set_direction(&mut self, direction: Direction) -> bool {
        if is_opposite(self.direction, direction) {
            false
        } else {
            self.next_direction = direction;
            true
        }
    }

    /// Point the snake in `direction` regardless of where it is currently
    /// facing.  Only meant for a snake that has not moved yet.
    pub(crate) fn face(&mut self, direction: Direction) {
        self.direction = direction;
        self.next_direction = direction;
    }

    /// Move the snake forwards one cell: every cell takes the position of the
    /// one in front of it, and then the head steps in the pending direction.
    pub(crate) fn walk(&mut self) {
        let len = self.cells.len();
        self.cells.copy_within(0..len - 1, 1);
        self.direction = self.next_direction;
        self.cells[0] = self.direction.step(self.cells[0]);
    }

    /// Append a new segment at the tail
    pub(crate) fn grow(&mut self) {
        self.cells.push(GROWTH_SENTINEL);
    }
}
