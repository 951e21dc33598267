use crate::clock::Ticker;
use crate::config::Settings;
use crate::game::{Game, TickOutcome};
use crate::input::InputSource;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    backend::Backend,
    layout::{Position, Rect},
    Terminal,
};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App<R = StdRng> {
    screen: Screen<R>,
    ticker: Ticker,
}

impl<R: Rng + SeedableRng> App<R> {
    pub(crate) fn new(settings: Settings, rng: R) -> App<R> {
        let ticker = Ticker::new(settings.tick_period);
        App {
            screen: Screen::Game(Game::new(settings, rng)),
            ticker,
        }
    }

    pub(crate) fn run<B: Backend, I: InputSource>(
        mut self,
        terminal: &mut Terminal<B>,
        input: &mut I,
    ) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            let area = Rect::from((Position::ORIGIN, terminal.size()?));
            self.process_input(input, area)?;
        }
        info!("Quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    /// Either run a tick of the game, if one is due, or wait for the next
    /// input event (until the next tick is due, if the game is ticking) and
    /// handle it.
    fn process_input<I: InputSource>(&mut self, input: &mut I, area: Rect) -> io::Result<()> {
        let Screen::Game(ref mut game) = self.screen else {
            return Ok(());
        };
        let timeout = if game.ticking() {
            if self.ticker.fire() {
                if let TickOutcome::GameOver(_) = game.tick() {
                    self.ticker.stop();
                }
                return Ok(());
            }
            Some(self.ticker.remaining())
        } else {
            self.ticker.stop();
            None
        };
        if let Some(event) = input.next_event(timeout)? {
            if let Some(screen) = game.handle_event(event, area) {
                self.screen = screen;
            }
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen<R = StdRng> {
    Game(Game<R>),
    Quit,
}
