#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the cleaning robot simulator.
//!
//! This crate defines the value types that connect adapters, the grid, and
//! the execution systems. Adapters translate requests into [`Command`] or
//! [`LabelledCommand`] values, the execution engine walks them one unit step
//! at a time, and reports an [`ExecutionResult`] describing how the run
//! ended and which tiles were cleaned along the way.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod movement;

/// Location of a single tile expressed as signed column and row coordinates.
///
/// Coordinates are signed so callers can describe positions that lie outside
/// of any grid, such as a requested start of `(-1, -1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Upper-left corner of every grid.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (i32, i32) {
    fn from(position: Position) -> Self {
        (position.x, position.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal movement directions understood by the robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Wire label accepted for the direction.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl FromStr for Direction {
    type Err = InvalidDirection;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.label() == label)
            .ok_or_else(|| InvalidDirection::new(label))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a movement label does not name one of the four directions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid direction `{label}`")]
pub struct InvalidDirection {
    label: String,
}

impl InvalidDirection {
    /// Captures the rejected label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Label that failed to resolve.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Anything the execution engine can walk as a sequence of unit steps.
pub trait Instruction {
    /// Resolves the direction of travel for every step of the instruction.
    fn direction(&self) -> Result<Direction, InvalidDirection>;

    /// Number of unit steps to take. Zero is a no-op.
    fn steps(&self) -> u32;
}

/// Typed movement command whose direction is already known to be valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    direction: Direction,
    steps: u32,
}

impl Command {
    /// Creates a command that moves `steps` tiles toward `direction`.
    #[must_use]
    pub const fn new(direction: Direction, steps: u32) -> Self {
        Self { direction, steps }
    }
}

impl Instruction for Command {
    fn direction(&self) -> Result<Direction, InvalidDirection> {
        Ok(self.direction)
    }

    fn steps(&self) -> u32 {
        self.steps
    }
}

/// Movement command exactly as it arrived on the wire.
///
/// The label is resolved lazily, when the engine reaches the first step of
/// the command, so earlier commands in the same run still execute. Serialized
/// as a `[label, steps]` pair; negative step counts fail to deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct LabelledCommand {
    label: String,
    steps: u32,
}

impl LabelledCommand {
    /// Creates a labelled command.
    #[must_use]
    pub fn new(label: impl Into<String>, steps: u32) -> Self {
        Self {
            label: label.into(),
            steps,
        }
    }

    /// Raw direction label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Instruction for LabelledCommand {
    fn direction(&self) -> Result<Direction, InvalidDirection> {
        self.label.parse()
    }

    fn steps(&self) -> u32 {
        self.steps
    }
}

impl From<(String, u32)> for LabelledCommand {
    fn from((label, steps): (String, u32)) -> Self {
        Self { label, steps }
    }
}

impl From<LabelledCommand> for (String, u32) {
    fn from(command: LabelledCommand) -> Self {
        (command.label, command.steps)
    }
}

impl From<Command> for LabelledCommand {
    fn from(command: Command) -> Self {
        Self::new(command.direction.label(), command.steps)
    }
}

/// Sums the unit steps requested by a batch of instructions.
#[must_use]
pub fn total_steps<I: Instruction>(commands: &[I]) -> u64 {
    commands
        .iter()
        .map(|command| u64::from(command.steps()))
        .sum()
}

/// Terminal status of one command-execution call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Every step of every command was taken.
    Completed,
    /// The run stopped early on an invalid start or a blocked step.
    Error,
}

impl RunStatus {
    /// Wire label of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a run finished with [`RunStatus::Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HaltReason {
    /// The requested start is out of bounds or on an obstacle.
    InvalidStart {
        /// Start that was rejected.
        position: Position,
    },
    /// A step would leave the grid or enter an obstacle.
    BlockedMove {
        /// Last committed position.
        from: Position,
        /// Direction of the rejected step.
        direction: Direction,
    },
}

/// Outcome returned by value from a single execution run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    status: RunStatus,
    cleaned_tiles: Vec<Position>,
    halt: Option<HaltReason>,
}

impl ExecutionResult {
    /// Result of a run that took every requested step.
    #[must_use]
    pub fn completed(cleaned_tiles: Vec<Position>) -> Self {
        Self {
            status: RunStatus::Completed,
            cleaned_tiles,
            halt: None,
        }
    }

    /// Result of a run that stopped early.
    #[must_use]
    pub fn halted(reason: HaltReason, cleaned_tiles: Vec<Position>) -> Self {
        Self {
            status: RunStatus::Error,
            cleaned_tiles,
            halt: Some(reason),
        }
    }

    /// Terminal status of the run.
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Cleaned tiles in ascending `(x, y)` order.
    #[must_use]
    pub fn cleaned_tiles(&self) -> &[Position] {
        &self.cleaned_tiles
    }

    /// Why the run stopped, if it did not complete.
    #[must_use]
    pub const fn halt(&self) -> Option<HaltReason> {
        self.halt
    }

    /// Consumes the result, yielding the cleaned tiles.
    #[must_use]
    pub fn into_cleaned_tiles(self) -> Vec<Position> {
        self.cleaned_tiles
    }
}

/// Robot model selected for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Cleans every tile it visits.
    #[default]
    Base,
    /// Uses a noisy dirt sensor and skips tiles it already cleaned.
    Premium,
}

impl ModelKind {
    /// Resolves a model tag case-insensitively, falling back to [`ModelKind::Base`].
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("premium") {
            Self::Premium
        } else {
            Self::Base
        }
    }

    /// Tag recorded in responses and history.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
