use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step away from `pos` in this direction.
    ///
    /// Steps off the top or left edge of the coordinate space saturate at 0;
    /// the arena's border keeps a live snake from ever getting there.
    pub(crate) fn step(self, pos: Position) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.saturating_sub(1),
            Direction::Down => y = y.saturating_add(1),
            Direction::Left => x = x.saturating_sub(1),
            Direction::Right => x = x.saturating_add(1),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Do `a` and `b` point in exactly opposite directions?
pub(crate) fn is_opposite(a: Direction, b: Direction) -> bool {
    a.reverse() == b
}
