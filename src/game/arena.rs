use ratatui::layout::{Position, Positions, Rect, Size};

/// The rectangular playfield.  The outermost `margin` rows & columns on every
/// side form the border, which is drawn and is lethal to touch; the rest is
/// the interior.
///
/// All positions are relative to the top-left corner of the arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Arena {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) margin: u16,
}

impl Arena {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Return the region of the arena that the snake may occupy
    pub(crate) fn interior(self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.width.saturating_sub(self.margin.saturating_mul(2)),
            self.height.saturating_sub(self.margin.saturating_mul(2)),
        )
    }

    pub(crate) fn in_interior(self, pos: Position) -> bool {
        self.interior().contains(pos)
    }

    /// Iterate over every interior cell in row-major order
    pub(crate) fn interior_positions(self) -> Positions {
        self.interior().positions()
    }

    /// Iterate over every border cell in row-major order
    pub(crate) fn border_positions(self) -> impl Iterator<Item = Position> {
        Rect::from((Position::ORIGIN, self.size()))
            .positions()
            .filter(move |&p| !self.in_interior(p))
    }
}
