use super::arena::Arena;
use super::snake::Snake;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    position: Position,
}

impl Food {
    pub(crate) fn new(position: Position) -> Food {
        Food { position }
    }

    pub(crate) fn position(self) -> Position {
        self.position
    }

    /// Move the food to a cell of the arena's interior chosen uniformly at
    /// random from those not occupied by the snake.
    ///
    /// Returns `false` and leaves the food where it is if the snake fills the
    /// whole interior.
    pub(crate) fn relocate<R: Rng>(&mut self, arena: Arena, snake: &Snake, rng: &mut R) -> bool {
        let occupied = snake.cells();
        match arena
            .interior_positions()
            .filter(|p| !occupied.contains(p))
            .choose(rng)
        {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }
}
