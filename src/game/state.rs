use super::direction::Direction;
use crate::consts::{self, GRID_SIZE};
use rand::Rng;
use ratatui::layout::Position;
use std::collections::VecDeque;
use tracing::debug;

/// Everything about a game of Snake that changes as it's played.
///
/// All positions are grid coordinates, with `(0, 0)` at the top-left corner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    /// The cells occupied by the snake, head first.  Never empty, and never
    /// contains duplicates while the game is not over.
    pub(super) snake: VecDeque<Position>,

    /// The cell containing the food.  Never one of the cells in `snake`
    /// except after the snake has filled the whole grid.
    pub(super) food: Position,

    /// The direction in which the snake will move on the next tick
    pub(super) direction: Direction,

    pub(super) game_over: bool,

    /// Number of pieces of food eaten; always one less than the length of
    /// the snake
    pub(super) score: u32,
}

impl GameState {
    /// Create the state at the start of a game: a one-cell snake in the
    /// middle of the grid heading right, with the food off to its
    /// lower-right.
    pub(crate) fn new() -> GameState {
        GameState {
            snake: VecDeque::from([consts::INITIAL_HEAD]),
            food: consts::INITIAL_FOOD,
            direction: Direction::Right,
            game_over: false,
            score: 0,
        }
    }

    pub(crate) fn game_over(&self) -> bool {
        self.game_over
    }

    /// Change the direction of the snake to `direction`.  Turning to face
    /// directly backwards is not allowed; if `direction` is the reverse of
    /// the current direction, nothing happens and `false` is returned.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Move the snake forwards one cell, wrapping around the edges of the
    /// grid.  If it lands on the food, the snake grows by one cell and new
    /// food is placed using `rng`; if it lands on itself, the game ends.
    pub(crate) fn advance<R: Rng>(&mut self, rng: &mut R) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Frozen;
        }
        let Some(&head) = self.snake.front() else {
            return TickOutcome::Frozen;
        };
        let new_head = self.direction.advance(head);
        // The tail is still in place at this point, so moving into the cell
        // it's about to vacate counts as a collision.
        if self.snake.contains(&new_head) {
            self.game_over = true;
            return TickOutcome::Collided;
        }
        self.snake.push_front(new_head);
        if new_head != self.food {
            let _ = self.snake.pop_back();
            return TickOutcome::Moved;
        }
        self.score += 1;
        if let Some(food) = place_food(&self.snake, rng) {
            debug!(score = self.score, ?food, "Food eaten");
            self.food = food;
            TickOutcome::Ate
        } else {
            self.game_over = true;
            TickOutcome::Filled
        }
    }
}

impl Default for GameState {
    fn default() -> GameState {
        GameState::new()
    }
}

/// What happened during a call to [`GameState::advance()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The game was already over, so nothing changed
    Frozen,

    /// The snake moved without eating anything
    Moved,

    /// The snake ate the food and grew
    Ate,

    /// The snake ran into itself, ending the game
    Collided,

    /// The snake ate the food and now fills the entire grid, leaving nowhere
    /// for new food to go
    Filled,
}

impl TickOutcome {
    /// Did this tick end the game?
    pub(crate) fn ended_game(self) -> bool {
        matches!(self, TickOutcome::Collided | TickOutcome::Filled)
    }
}

/// Pick a uniformly random cell of the grid that is not occupied by `snake`
/// by sampling cells until an unoccupied one turns up.  Returns `None` if
/// there are no unoccupied cells.
fn place_food<R: Rng>(snake: &VecDeque<Position>, rng: &mut R) -> Option<Position> {
    let cells = usize::from(GRID_SIZE) * usize::from(GRID_SIZE);
    if snake.len() >= cells {
        return None;
    }
    std::iter::repeat_with(|| {
        Position::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE))
    })
    .find(|pos| !snake.contains(pos))
}
