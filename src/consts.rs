//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Number of cells along each side of the square playing grid
pub(crate) const GRID_SIZE: u16 = 20;

/// Number of terminal columns used to draw a single grid cell.  Terminal
/// cells are roughly twice as tall as they are wide, so two columns per cell
/// keeps the board square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Default time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(150);

/// Position of the snake's single cell at the start of a game
pub(crate) const INITIAL_HEAD: Position = Position { x: 10, y: 10 };

/// Position of the first piece of food at the start of a game
pub(crate) const INITIAL_FOOD: Position = Position { x: 15, y: 15 };

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: GRID_SIZE * CELL_WIDTH + 2,
    height: GRID_SIZE + 6,
};

/// Glyphs for one cell of the snake's body
pub(crate) const SNAKE_SYMBOL: &str = "██";

/// Glyphs for the food cell
pub(crate) const FOOD_SYMBOL: &str = "▓▓";

/// Style for the snake's cells
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
