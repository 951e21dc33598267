mod action;
mod arena;
mod collision;
mod direction;
mod food;
mod game_over;
mod paused;
mod snake;
use self::action::Action;
pub(crate) use self::arena::Arena;
use self::direction::Direction;
use self::food::Food;
use self::game_over::{Ending, GameOver, GameOverOpt};
use self::paused::Paused;
use self::snake::Snake;
use crate::app::Screen;
use crate::config::Settings;
use crate::consts;
use crate::input::InputEvent;
use crate::util::{center_rect, get_display_area};
use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    style::Style,
    text::Line,
    widgets::Widget,
    Frame,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = StdRng> {
    rng: R,
    settings: Settings,
    snake: Snake,
    food: Food,
    state: GameState,
    /// Has the player pressed a direction key yet?  Until then, the snake
    /// stays put.
    started: bool,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(settings: Settings, mut rng: R) -> Game<R> {
        let snake = Snake::new(settings.start, settings.initial_length);
        let mut food = Food::new(settings.start);
        if !food.relocate(settings.arena, &snake, &mut rng) {
            debug!("No room for food in new arena");
        }
        info!(
            "Starting new round: arena {}x{} (border {}), snake at {:?}, food at {:?}",
            settings.arena.width,
            settings.arena.height,
            settings.arena.margin,
            snake.head(),
            food.position(),
        );
        Game {
            rng,
            settings,
            snake,
            food,
            state: GameState::Running,
            started: false,
        }
    }

    /// Advance the simulation by one step: move the snake, then check for
    /// eating, self-collision, and wall collision, in that order.
    ///
    /// Does nothing unless the game is running and the snake has started
    /// moving.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if !self.ticking() {
            return TickOutcome::Continue;
        }
        self.snake.walk();
        let head = self.snake.head();
        let mut arena_full = false;
        if collision::head_vs_food(head, self.food.position()) {
            self.snake.grow();
            arena_full = !self
                .food
                .relocate(self.settings.arena, &self.snake, &mut self.rng);
            debug!(
                "Ate food at {head:?}; score is now {}, next food at {:?}",
                self.score(),
                self.food.position()
            );
        }
        let ending = if collision::head_vs_body(&self.snake) {
            Ending::SelfCollision
        } else if collision::head_vs_border(head, self.settings.arena) {
            Ending::WallCollision
        } else if arena_full {
            Ending::ArenaFull
        } else {
            return TickOutcome::Continue;
        };
        info!(
            "Round over ({ending}) at {head:?} with score {}",
            self.score()
        );
        self.state = GameState::GameOver(GameOver::new(ending, self.score()));
        TickOutcome::GameOver(ending)
    }
}

impl<R: Rng + SeedableRng> Game<R> {
    /// Handle an input event.  `area` is the area of the whole terminal, for
    /// resolving mouse positions.  Returns `Some` if the app should switch to
    /// a new screen.
    pub(crate) fn handle_event(&mut self, event: InputEvent, area: Rect) -> Option<Screen<R>> {
        match Action::from_event(event, &self.state) {
            Action::Turn(direction) => self.turn(direction),
            Action::Pause => self.toggle_pause(),
            Action::Restart => return Some(Screen::Game(self.restart())),
            Action::Quit => return Some(Screen::Quit),
            Action::Menu(action) => {
                let popup = GameLayout::new(area, self.settings.arena).popup(GameOver::SIZE);
                if let GameState::GameOver(ref mut over) = self.state {
                    match over.handle_action(action, popup)? {
                        GameOverOpt::Restart => return Some(Screen::Game(self.restart())),
                        GameOverOpt::Quit => return Some(Screen::Quit),
                    }
                }
            }
            Action::None => (),
        }
        None
    }

    /// Build a brand-new game with the same settings and a random number
    /// generator seeded from this game's
    pub(crate) fn restart(&mut self) -> Game<R> {
        info!("Restarting");
        Game::new(self.settings.clone(), R::from_rng(&mut self.rng))
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// The score is the length of the snake
    pub(crate) fn score(&self) -> usize {
        self.snake.len()
    }

    /// Should the clock be ticking?
    pub(crate) fn ticking(&self) -> bool {
        self.started && self.state == GameState::Running
    }

    fn turn(&mut self, direction: Direction) {
        if self.state == GameState::Paused {
            info!("Resuming");
            self.state = GameState::Running;
        }
        if !self.started {
            self.snake.face(direction);
            self.started = true;
        } else if !self.snake.set_direction(direction) {
            trace!(
                "Ignoring attempt to reverse from {:?} to {direction:?}",
                self.snake.direction()
            );
        }
    }

    fn toggle_pause(&mut self) {
        match self.state {
            GameState::Running => {
                info!("Pausing");
                self.state = GameState::Paused;
            }
            GameState::Paused => {
                info!("Resuming");
                self.state = GameState::Running;
            }
            GameState::GameOver(_) => (),
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = GameLayout::new(area, self.settings.arena);
        let styles = self.settings.styles;
        let mut canvas = Canvas {
            area: layout.arena,
            buf,
        };
        canvas.draw_cell(self.food.position(), consts::FOOD_SYMBOL, styles.food);
        for pos in self.settings.arena.border_positions() {
            canvas.draw_cell(pos, consts::BORDER_SYMBOL, styles.border);
        }
        Line::styled(format!(" Score: {}", self.score()), consts::SCORE_BAR_STYLE)
            .render(layout.score, canvas.buf);
        for &pos in self.snake.body() {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, styles.snake);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        match self.state {
            GameState::GameOver(ref over) if over.ending() != Ending::ArenaFull => {
                canvas.draw_cell(
                    self.snake.head(),
                    consts::COLLISION_SYMBOL,
                    consts::COLLISION_STYLE,
                );
            }
            _ => canvas.draw_cell(self.snake.head(), self.snake.head_symbol(), styles.snake),
        }

        match self.state {
            GameState::Running => (),
            GameState::Paused => Paused.render(layout.popup(Paused::SIZE), canvas.buf),
            GameState::GameOver(ref over) => {
                over.render(layout.popup(GameOver::SIZE), canvas.buf);
            }
        }
    }
}

/// The screen regions that the game is drawn in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameLayout {
    display: Rect,
    score: Rect,
    arena: Rect,
}

impl GameLayout {
    fn new(area: Rect, arena: Arena) -> GameLayout {
        let display = get_display_area(area);
        let [score, field] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        GameLayout {
            display,
            score,
            arena: center_rect(field, arena.size()),
        }
    }

    fn popup(self, size: Size) -> Rect {
        center_rect(self.display, size)
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` at `pos` relative to the canvas's area.  Positions outside
    /// the area are skipped.
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    Running,
    Paused,
    GameOver(GameOver),
}

/// The result of a single tick of the simulation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    Continue,
    GameOver(Ending),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use pretty_assertions::assert_eq;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn new_game() -> Game<ChaCha12Rng> {
        Game::new(Settings::default(), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn key(cmd: Command) -> InputEvent {
        InputEvent::Key(cmd)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(ratatui::buffer::Cell::symbol))
            .collect()
    }

    fn symbol_at(buf: &Buffer, x: u16, y: u16) -> &str {
        buf.cell((x, y)).map_or("", ratatui::buffer::Cell::symbol)
    }

    fn render(game: &Game<ChaCha12Rng>) -> Buffer {
        let mut buffer = Buffer::empty(SCREEN);
        game.render(SCREEN, &mut buffer);
        buffer
    }

    #[test]
    fn new_game_state() {
        let game = new_game();
        assert_eq!(game.state, GameState::Running);
        assert!(!game.ticking());
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake.head(), Position::new(10, 10));
        assert_eq!(game.snake.direction(), Direction::Right);
        assert!(game.settings.arena.in_interior(game.food.position()));
        assert_ne!(game.food.position(), game.snake.head());
    }

    #[test]
    fn render_new_game() {
        let game = new_game();
        let buffer = render(&game);
        assert!(row_text(&buffer, 0).starts_with(" Score: 1 "));
        // The arena is centered horizontally below the score bar
        assert_eq!(symbol_at(&buffer, 10, 1), "█");
        assert_eq!(symbol_at(&buffer, 69, 23), "█");
        assert_eq!(symbol_at(&buffer, 11, 2), "█");
        assert_eq!(symbol_at(&buffer, 9, 1), " ");
        assert_eq!(symbol_at(&buffer, 70, 1), " ");
        // The snake's head
        assert_eq!(symbol_at(&buffer, 20, 11), "<");
        let food = game.food.position();
        assert_eq!(symbol_at(&buffer, 10 + food.x, 1 + food.y), "●");
        let food_count = (0..24)
            .map(|y| row_text(&buffer, y).matches('●').count())
            .sum::<usize>();
        assert_eq!(food_count, 1);
    }

    #[test]
    fn no_motion_before_first_key() {
        let mut game = new_game();
        for _ in 0..5 {
            assert_eq!(game.tick(), TickOutcome::Continue);
        }
        assert_eq!(game.snake.head(), Position::new(10, 10));
    }

    #[test]
    fn first_key_starts_motion() {
        let mut game = new_game();
        assert!(game.handle_event(key(Command::Left), SCREEN).is_none());
        assert!(game.ticking());
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(9, 10));
    }

    #[test]
    fn move_without_eating() {
        let mut game = new_game();
        game.food = Food::new(Position::new(3, 3));
        assert!(game.handle_event(key(Command::Right), SCREEN).is_none());
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(11, 10));
        assert_eq!(game.food.position(), Position::new(3, 3));
        assert_eq!(game.snake.len(), 1);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn eat_food() {
        let mut game = new_game();
        game.snake.cells = vec![Position::new(11, 10)];
        game.food = Food::new(Position::new(12, 10));
        game.started = true;
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(12, 10));
        assert_eq!(game.snake.len(), 2);
        assert_eq!(game.score(), 2);
        let food = game.food.position();
        assert_ne!(food, Position::new(12, 10));
        assert!(!game.snake.cells().contains(&food));
        assert!(game.settings.arena.in_interior(food));
        // The new segment takes up the old head position on the next move
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(
            game.snake.cells(),
            [Position::new(13, 10), Position::new(12, 10)]
        );
    }

    #[test]
    fn reversal_ignored() {
        let mut game = new_game();
        game.food = Food::new(Position::new(3, 3));
        assert!(game.handle_event(key(Command::Right), SCREEN).is_none());
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert!(game.handle_event(key(Command::Left), SCREEN).is_none());
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(12, 10));
        assert!(game.handle_event(key(Command::Down), SCREEN).is_none());
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(12, 11));
    }

    #[test]
    fn self_collision() {
        let mut game = new_game();
        game.food = Food::new(Position::new(3, 3));
        game.snake.cells = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ];
        game.snake.direction = Direction::Left;
        game.snake.next_direction = Direction::Left;
        game.started = true;
        assert!(game.handle_event(key(Command::Down), SCREEN).is_none());
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::SelfCollision));
        assert!(matches!(game.state, GameState::GameOver(over) if over.score == 5));
        assert!(!game.ticking());
        // Further ticks are ignored
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(5, 6));
    }

    #[test]
    fn wall_collision() {
        let mut game = new_game();
        game.food = Food::new(Position::new(3, 3));
        // Rightmost interior column of a 60-wide arena with a border of 2
        game.snake.cells = vec![Position::new(57, 10)];
        game.started = true;
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::WallCollision));
        assert_eq!(game.snake.head(), Position::new(58, 10));
        let buffer = render(&game);
        assert_eq!(symbol_at(&buffer, 68, 11), "×");
        assert!((0..24).any(|y| row_text(&buffer, y).contains(" GAME OVER ")));
        assert!((0..24).any(|y| row_text(&buffer, y).contains("You hit the wall!")));
        assert!((0..24).any(|y| row_text(&buffer, y).contains("Your score is 1 ")));
    }

    #[test]
    fn wall_collision_top() {
        let mut game = new_game();
        game.food = Food::new(Position::new(3, 3));
        game.snake.cells = vec![Position::new(10, 2)];
        assert!(game.handle_event(key(Command::Up), SCREEN).is_none());
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::WallCollision));
    }

    #[test]
    fn arena_full() {
        let settings = Settings {
            arena: Arena {
                width: 7,
                height: 5,
                margin: 2,
            },
            start: Position::new(2, 2),
            ..Settings::default()
        };
        let mut game = Game::new(settings, ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.snake.cells = vec![
            Position::new(3, 2),
            Position::new(2, 2),
            snake::GROWTH_SENTINEL,
        ];
        game.food = Food::new(Position::new(4, 2));
        game.started = true;
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::ArenaFull));
        // Three interior cells, plus the meal that filled them
        let interior = usize::try_from(game.settings.arena.interior().area()).unwrap();
        assert_eq!(interior, 3);
        assert_eq!(game.score(), interior + 1);
        assert!(matches!(game.state, GameState::GameOver(over) if over.score == 4));
    }

    #[test]
    fn score_tracks_length() {
        let mut game = new_game();
        assert!(game.handle_event(key(Command::Right), SCREEN).is_none());
        // Head straight right from (10, 10), putting food in the way of every
        // third move, and stop short of the wall at x = 58
        for i in 0..45 {
            game.food = if i % 3 == 0 {
                Food::new(game.snake.direction().step(game.snake.head()))
            } else {
                Food::new(Position::new(3, 3))
            };
            assert_eq!(game.tick(), TickOutcome::Continue);
            assert_eq!(game.score(), game.snake.len());
        }
        assert_eq!(game.snake.head(), Position::new(55, 10));
        assert_eq!(game.score(), 16);
    }

    #[test]
    fn pause_and_resume() {
        let mut game = new_game();
        game.food = Food::new(Position::new(3, 3));
        assert!(game.handle_event(key(Command::Right), SCREEN).is_none());
        assert!(game.handle_event(key(Command::P), SCREEN).is_none());
        assert_eq!(game.state, GameState::Paused);
        assert!(!game.ticking());
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(10, 10));
        let buffer = render(&game);
        assert!((0..24).any(|y| row_text(&buffer, y).contains(" PAUSED ")));
        assert!(game.handle_event(key(Command::Esc), SCREEN).is_none());
        assert_eq!(game.state, GameState::Running);
        assert!(game.handle_event(InputEvent::FocusLost, SCREEN).is_none());
        assert_eq!(game.state, GameState::Paused);
        // A direction key resumes & turns at the same time
        assert!(game.handle_event(key(Command::Up), SCREEN).is_none());
        assert_eq!(game.state, GameState::Running);
        assert_eq!(game.tick(), TickOutcome::Continue);
        assert_eq!(game.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn restart_after_game_over() {
        let mut game = new_game();
        game.snake.cells = vec![Position::new(57, 10), Position::new(56, 10)];
        game.started = true;
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::WallCollision));
        let Some(Screen::Game(new)) = game.handle_event(key(Command::R), SCREEN) else {
            panic!("restart did not produce a new game");
        };
        assert_eq!(new.state, GameState::Running);
        assert_eq!(new.score(), 1);
        assert_eq!(new.snake.len(), 1);
        assert_eq!(new.snake.head(), Position::new(10, 10));
        assert!(!new.started);
    }

    #[test]
    fn restart_ignored_while_running() {
        let mut game = new_game();
        assert!(game.handle_event(key(Command::R), SCREEN).is_none());
        assert!(game.handle_event(key(Command::Q), SCREEN).is_none());
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn quit_from_menu() {
        let mut game = new_game();
        game.snake.cells = vec![Position::new(57, 10)];
        game.started = true;
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::WallCollision));
        assert!(game
            .handle_event(InputEvent::Key(Command::Down), SCREEN)
            .is_none());
        assert!(matches!(
            game.handle_event(key(Command::Enter), SCREEN),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn mouse_on_menu() {
        let mut game = new_game();
        game.snake.cells = vec![Position::new(57, 10)];
        game.started = true;
        assert_eq!(game.tick(), TickOutcome::GameOver(Ending::WallCollision));
        // The pop-up is centered on the 80x24 display: (27, 9) to (52, 14)
        let popup = GameLayout::new(SCREEN, game.settings.arena).popup(GameOver::SIZE);
        assert_eq!(popup, Rect::new(27, 9, GameOver::WIDTH, GameOver::HEIGHT));
        let quit = Position::new(32, 13);
        assert!(game
            .handle_event(InputEvent::MouseMove(quit), SCREEN)
            .is_none());
        assert!(matches!(
            game.state,
            GameState::GameOver(over) if over.selection == GameOverOpt::Quit
        ));
        assert!(matches!(
            game.handle_event(InputEvent::MouseClick(Position::new(32, 12)), SCREEN),
            Some(Screen::Game(_))
        ));
    }

    #[test]
    fn quit_anytime() {
        let mut game = new_game();
        assert!(matches!(
            game.handle_event(InputEvent::Quit, SCREEN),
            Some(Screen::Quit)
        ));
    }
}
