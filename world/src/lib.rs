#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative spatial model for the cleaning robot simulator.
//!
//! A [`Grid`] is fixed once constructed: its dimensions and obstacle set
//! never change, so a single instance can be shared by reference across any
//! number of concurrently running robots.

use std::collections::BTreeSet;

use cleaning_robot_core::Position;
use thiserror::Error;

/// Capability required by the execution engine from a spatial model.
pub trait GridLike {
    /// Reports whether the robot may occupy `position`.
    fn is_valid_move(&self, position: Position) -> bool;
}

/// Reasons a grid cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// An obstacle lies outside the grid bounds.
    #[error("obstacle {position} lies outside the {width}x{height} grid")]
    ObstacleOutOfBounds {
        /// Offending obstacle.
        position: Position,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
}

/// Rectangular grid of tiles with a fixed set of obstacles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    obstacles: BTreeSet<Position>,
}

impl Grid {
    /// Creates a grid, validating its dimensions and obstacles.
    pub fn new(
        width: u32,
        height: u32,
        obstacles: impl IntoIterator<Item = Position>,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }

        let obstacles: BTreeSet<Position> = obstacles.into_iter().collect();
        if let Some(position) = obstacles
            .iter()
            .copied()
            .find(|position| !within(*position, width, height))
        {
            return Err(GridError::ObstacleOutOfBounds {
                position,
                width,
                height,
            });
        }

        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    /// Exclusive upper bound on x.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Exclusive upper bound on y.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether `position` lies inside the grid bounds, ignoring obstacles.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        within(position, self.width, self.height)
    }

    /// Reports whether `position` holds an obstacle.
    #[must_use]
    pub fn is_obstacle(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// Obstacles in ascending `(x, y)` order.
    pub fn obstacles(&self) -> impl Iterator<Item = Position> + '_ {
        self.obstacles.iter().copied()
    }

    /// Number of tiles the robot may occupy.
    #[must_use]
    pub fn walkable_tiles(&self) -> u64 {
        let total = u64::from(self.width) * u64::from(self.height);
        total - self.obstacles.len() as u64
    }
}

impl GridLike for Grid {
    fn is_valid_move(&self, position: Position) -> bool {
        self.contains(position) && !self.is_obstacle(position)
    }
}

fn within(position: Position, width: u32, height: u32) -> bool {
    let x = i64::from(position.x());
    let y = i64::from(position.y());
    (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y)
}
