use super::action::MenuAction;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::fmt;

/// Why a round came to an end
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    SelfCollision,
    WallCollision,
    /// The snake filled the arena, leaving nowhere to put the food.  The
    /// final meal still counts, so the score is one more than the number of
    /// interior cells.
    ArenaFull,
}

impl Ending {
    fn message(self) -> &'static str {
        match self {
            Ending::SelfCollision => "You ran into yourself!",
            Ending::WallCollision => "You hit the wall!",
            Ending::ArenaFull => "You filled the arena!",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ending::SelfCollision => "self-collision",
            Ending::WallCollision => "wall collision",
            Ending::ArenaFull => "arena full",
        };
        f.pad(s)
    }
}

/// End-of-round state: the final score plus a pop-up menu for choosing
/// whether to play again
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameOver {
    ending: Ending,
    pub(super) score: usize,
    pub(super) selection: GameOverOpt,
}

impl GameOver {
    /// The height that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(crate) const HEIGHT: u16 = 6;

    /// The width that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(crate) const WIDTH: u16 = 26;

    pub(crate) const SIZE: Size = Size {
        width: Self::WIDTH,
        height: Self::HEIGHT,
    };

    /// Number of text lines above the menu options
    const HEADER_LINES: usize = 2;

    pub(crate) fn new(ending: Ending, score: usize) -> GameOver {
        GameOver {
            ending,
            score,
            selection: GameOverOpt::min(),
        }
    }

    pub(crate) fn ending(&self) -> Ending {
        self.ending
    }

    /// Handle a menu interaction.  `area` is the area in which the pop-up is
    /// drawn, for resolving mouse positions.  Returns `Some` if the user made
    /// a choice.
    pub(crate) fn handle_action(&mut self, action: MenuAction, area: Rect) -> Option<GameOverOpt> {
        match action {
            MenuAction::Prev => {
                self.selection = self.selection.prev().unwrap_or_else(GameOverOpt::max);
            }
            MenuAction::Next => {
                self.selection = self.selection.next().unwrap_or_else(GameOverOpt::min);
            }
            MenuAction::Confirm => return Some(self.selection),
            MenuAction::Hover(pos) => {
                if let Some(opt) = Self::option_at(area, pos) {
                    self.selection = opt;
                }
            }
            MenuAction::Click(pos) => {
                let opt = Self::option_at(area, pos)?;
                self.selection = opt;
                return Some(opt);
            }
        }
        None
    }

    /// Return the menu option drawn at `pos`, if any
    fn option_at(area: Rect, pos: Position) -> Option<GameOverOpt> {
        Self::block()
            .inner(area)
            .rows()
            .skip(Self::HEADER_LINES)
            .zip(GameOverOpt::iter())
            .find_map(|(row, opt)| row.contains(pos).then_some(opt))
    }

    fn block() -> Block<'static> {
        Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset())
    }
}

impl Widget for &GameOver {
    /*
     * ┌────── GAME OVER ───────┐
     * │ You ran into yourself! │
     * │ Your score is 12       │
     * │ » Restart (r)          │
     * │   Quit (q)             │
     * └────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = GameOver::block();
        let inner = block.inner(area);
        block.render(area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Line::from(self.ending.message()).render(row, buf);
        }
        if let Some(row) = rows.next() {
            Line::from(format!("Your score is {}", self.score)).render(row, buf);
        }
        for (opt, row) in GameOverOpt::iter().zip(rows) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

/// The choices in the end-of-round menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum GameOverOpt {
    /// Start a new round
    Restart,

    /// Quit the application
    Quit,
}

impl GameOverOpt {
    /// Render the option as a `Line` for display in the menu.  If `selected`
    /// is `true`, this option is the currently-selected/active one.
    fn to_line(self, selected: bool) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        match self {
            GameOverOpt::Restart => {
                line.push_span("Restart (");
                line.push_span(Span::styled("r", consts::KEY_STYLE));
                line.push_span(")");
            }
            GameOverOpt::Quit => {
                line.push_span("Quit (");
                line.push_span(Span::styled("q", consts::KEY_STYLE));
                line.push_span(")");
            }
        }
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}
