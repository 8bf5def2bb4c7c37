//! Pure single-step coordinate arithmetic.
//!
//! Nothing here consults a grid; deciding whether a candidate can be entered
//! is the caller's job.

use crate::{Direction, Position};

/// Column and row offset applied by one step toward `direction`.
#[must_use]
pub const fn delta(direction: Direction) -> (i32, i32) {
    match direction {
        Direction::North => (0, -1),
        Direction::South => (0, 1),
        Direction::East => (1, 0),
        Direction::West => (-1, 0),
    }
}

/// Computes the position one step away from `position`.
///
/// Returns `None` when the step overflows the coordinate space; such a
/// candidate lies outside every grid.
#[must_use]
pub fn next_position(position: Position, direction: Direction) -> Option<Position> {
    let (dx, dy) = delta(direction);
    let x = position.x().checked_add(dx)?;
    let y = position.y().checked_add(dy)?;
    Some(Position::new(x, y))
}
