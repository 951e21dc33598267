use super::direction::Direction;
use super::GameState;
use crate::command::Command;
use crate::input::InputEvent;
use ratatui::layout::Position;

/// What an input event asks the game to do, given the state it is in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    /// Steer the snake (also starts it moving, or resumes a paused game)
    Turn(Direction),
    /// Pause a running game or resume a paused one
    Pause,
    Restart,
    Quit,
    Menu(MenuAction),
    None,
}

/// Interaction with the end-of-round menu
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum MenuAction {
    Prev,
    Next,
    Confirm,
    Hover(Position),
    Click(Position),
}

impl Action {
    pub(crate) fn from_event(event: InputEvent, state: &GameState) -> Action {
        match (state, event) {
            (_, InputEvent::Quit) => Action::Quit,
            (GameState::Running | GameState::Paused, InputEvent::Key(cmd)) => match cmd {
                Command::Up => Action::Turn(Direction::Up),
                Command::Down => Action::Turn(Direction::Down),
                Command::Left => Action::Turn(Direction::Left),
                Command::Right => Action::Turn(Direction::Right),
                Command::Esc | Command::P => Action::Pause,
                Command::Q if matches!(state, GameState::Paused) => Action::Quit,
                _ => Action::None,
            },
            (GameState::Running, InputEvent::FocusLost) => Action::Pause,
            (GameState::GameOver(_), InputEvent::Key(cmd)) => match cmd {
                Command::R => Action::Restart,
                Command::Q => Action::Quit,
                Command::Up | Command::Prev => Action::Menu(MenuAction::Prev),
                Command::Down | Command::Next => Action::Menu(MenuAction::Next),
                Command::Enter => Action::Menu(MenuAction::Confirm),
                _ => Action::None,
            },
            (GameState::GameOver(_), InputEvent::MouseMove(pos)) => {
                Action::Menu(MenuAction::Hover(pos))
            }
            (GameState::GameOver(_), InputEvent::MouseClick(pos)) => {
                Action::Menu(MenuAction::Click(pos))
            }
            _ => Action::None,
        }
    }
}
