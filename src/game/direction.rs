use crate::consts::GRID_SIZE;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the position one cell away from `pos` in this direction,
    /// wrapping around the edges of the grid.
    pub(crate) fn advance(self, pos: Position) -> Position {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = decrement_wrapping(y),
            Direction::Down => y = increment_wrapping(y),
            Direction::Left => x = decrement_wrapping(x),
            Direction::Right => x = increment_wrapping(x),
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

fn decrement_wrapping(v: u16) -> u16 {
    v.checked_sub(1).unwrap_or(GRID_SIZE - 1)
}

fn increment_wrapping(v: u16) -> u16 {
    v.saturating_add(1) % GRID_SIZE
}
