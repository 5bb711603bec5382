mod direction;
mod state;
use self::direction::Direction;
use self::state::GameState;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
    Frame,
};
use tracing::{debug, info, trace};

/// A game session: the state of the board plus whether the clock is running
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    state: GameState,
    running: bool,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new() -> Self {
        Game::new_with_rng(rand::rng())
    }
}

impl<R: Rng> Game<R> {
    /// Create a new game in its initial state.  The game starts out paused.
    pub(crate) fn new_with_rng(rng: R) -> Game<R> {
        Game {
            rng,
            state: GameState::new(),
            running: false,
        }
    }

    /// Advance the game by one tick.  Does nothing while paused.
    ///
    /// If the tick ends the game, the game stops running.
    pub(crate) fn tick(&mut self) {
        if !self.running {
            return;
        }
        let outcome = self.state.advance(&mut self.rng);
        trace!(?outcome, "Tick");
        if outcome.ended_game() {
            info!(score = self.state.score, ?outcome, "Game over");
            self.running = false;
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Is the game clock running (i.e., the game is neither paused nor
    /// over)?
    pub(crate) fn running(&self) -> bool {
        self.running
    }

    /// Apply a command from the user.  Direction commands turn the snake
    /// (unless that would reverse it); Space pauses or resumes the game, or
    /// starts a new game if the current one is over.
    pub(crate) fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Up => self.turn(Direction::Up),
            Command::Down => self.turn(Direction::Down),
            Command::Left => self.turn(Direction::Left),
            Command::Right => self.turn(Direction::Right),
            Command::Space => {
                if self.state.game_over() {
                    self.reset();
                } else {
                    self.running = !self.running;
                    debug!(running = self.running, "Toggled pause");
                }
            }
            Command::Quit => (),
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.running {
            debug!("Pausing");
            self.running = false;
        }
    }

    fn turn(&mut self, direction: Direction) {
        let current = self.state.direction;
        if self.state.turn(direction) {
            trace!(?direction, "Turned");
        } else {
            trace!(?current, requested = ?direction, "Ignoring reversal");
        }
    }

    fn reset(&mut self) {
        info!("Starting new game");
        self.state = GameState::new();
        self.running = true;
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, status_area, board_area, hint1_area, hint2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(consts::GRID_SIZE + 2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: {}", self.state.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);
        if !self.running && !self.state.game_over() {
            Line::from_iter([
                Span::raw("Press "),
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(" to Start"),
            ])
            .centered()
            .render(status_area, buf);
        }

        Block::bordered().render(board_area, buf);
        let level_area = board_area.inner(Margin::new(1, 1));
        let mut level = Canvas {
            area: level_area,
            buf,
        };
        // Draw the snake after the food so that, if the snake has filled the
        // grid, the head covers the last piece of food.
        level.draw_cell(self.state.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        for &pos in &self.state.snake {
            level.draw_cell(pos, consts::SNAKE_SYMBOL, consts::SNAKE_STYLE);
        }

        if self.state.game_over() {
            let popup_area = center_rect(
                level_area,
                Size {
                    width: GameOver::WIDTH,
                    height: GameOver::HEIGHT,
                },
            );
            GameOver.render(popup_area, buf);
        }

        Line::from("Use arrow keys to move")
            .centered()
            .render(hint1_area, buf);
        Line::from("Space to pause/resume")
            .centered()
            .render(hint2_area, buf);
    }
}

/// Accessor for drawing grid cells within the area of a buffer in which the
/// board's interior is drawn
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| x.checked_add(self.area.x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if x.saturating_add(consts::CELL_WIDTH) <= self.area.right() && y < self.area.bottom() {
            self.buf.set_string(x, y, symbol, style);
        }
    }
}

/// A widget for displaying the "game over" pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameOver;

impl GameOver {
    const HEIGHT: u16 = 3;
    const WIDTH: u16 = 26;
}

impl Widget for GameOver {
    /*
     * ┌────── GAME OVER ───────┐
     * │ Press Space to Restart │
     * └────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        Line::from_iter([
            Span::raw("Press "),
            Span::styled("Space", consts::KEY_STYLE),
            Span::raw(" to Restart"),
        ])
        .render(inner, buf);
    }
}
