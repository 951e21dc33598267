use crate::command::Command;
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use std::io;
use std::time::Duration;

/// An input event that the game knows how to react to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputEvent {
    /// The user asked to leave the program from anywhere (e.g., Ctrl-C)
    Quit,
    Key(Command),
    MouseMove(Position),
    MouseClick(Position),
    FocusLost,
}

impl InputEvent {
    pub(crate) fn from_crossterm(event: Event) -> Option<InputEvent> {
        match event {
            Event::FocusLost => Some(InputEvent::FocusLost),
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let pos = Position::new(column, row);
                match kind {
                    MouseEventKind::Moved => Some(InputEvent::MouseMove(pos)),
                    MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::MouseClick(pos)),
                    _ => None,
                }
            }
            ev => match Command::from_key_event(ev.as_key_press_event()?)? {
                Command::Quit => Some(InputEvent::Quit),
                cmd => Some(InputEvent::Key(cmd)),
            },
        }
    }
}

/// A source of input events
pub(crate) trait InputSource {
    /// Wait up to `timeout` (or indefinitely if `None`) for an event.
    ///
    /// Returns `Ok(None)` if the timeout expired or if the event that arrived
    /// is of no interest to the game.
    fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<InputEvent>>;
}

/// Input read from the terminal via crossterm
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<InputEvent>> {
        if let Some(wait) = timeout {
            if !poll(wait)? {
                return Ok(None);
            }
        }
        Ok(InputEvent::from_crossterm(read()?))
    }
}

/// A fixed queue of input events.  Once the queue runs dry, every call
/// produces [`InputEvent::Quit`].
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct ScriptedInput(std::collections::VecDeque<Option<InputEvent>>);

#[cfg(test)]
impl ScriptedInput {
    /// Create a script from a sequence of steps.  A `None` step stands for a
    /// poll that timed out.
    pub(crate) fn new<I: IntoIterator<Item = Option<InputEvent>>>(steps: I) -> ScriptedInput {
        ScriptedInput(steps.into_iter().collect())
    }
}

#[cfg(test)]
impl InputSource for ScriptedInput {
    fn next_event(&mut self, _timeout: Option<Duration>) -> io::Result<Option<InputEvent>> {
        Ok(self.0.pop_front().unwrap_or(Some(InputEvent::Quit)))
    }
}
