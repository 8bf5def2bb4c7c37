#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command execution engine that walks a robot across a grid.
//!
//! A [`Robot`] borrows its grid immutably and owns its position, its cleaned
//! tile set, and its dirtiness policy. Executing commands requires `&mut self`,
//! so at most one run is ever in flight per robot while any number of robots
//! may share the same grid.

use std::collections::BTreeSet;

use cleaning_robot_core::{
    movement, ExecutionResult, HaltReason, Instruction, InvalidDirection, Position,
};
use cleaning_robot_system_dirtiness::DirtinessPolicy;
use cleaning_robot_world::GridLike;
use tracing::{debug, trace};

/// Cleaning robot bound to a grid and a dirtiness policy.
#[derive(Debug)]
pub struct Robot<'grid, G: ?Sized, P> {
    grid: &'grid G,
    policy: P,
    position: Position,
    cleaned_tiles: BTreeSet<Position>,
}

impl<'grid, G, P> Robot<'grid, G, P>
where
    G: GridLike + ?Sized,
    P: DirtinessPolicy,
{
    /// Creates an idle robot parked at the origin with nothing cleaned.
    #[must_use]
    pub fn new(grid: &'grid G, policy: P) -> Self {
        Self {
            grid,
            policy,
            position: Position::ORIGIN,
            cleaned_tiles: BTreeSet::new(),
        }
    }

    /// Current position of the robot.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Policy deciding which visited tiles get cleaned.
    #[must_use]
    pub const fn policy(&self) -> &P {
        &self.policy
    }

    /// Tiles cleaned so far, in ascending `(x, y)` order.
    pub fn cleaned_tiles(&self) -> impl Iterator<Item = Position> + '_ {
        self.cleaned_tiles.iter().copied()
    }

    /// Number of distinct tiles cleaned so far.
    #[must_use]
    pub fn num_cleaned_tiles(&self) -> usize {
        self.cleaned_tiles.len()
    }

    /// Moves the robot back to the origin.
    ///
    /// Cleaned tiles are kept; pair with [`Robot::clear_cleaned_tiles`] for a
    /// full reset.
    pub fn reset_position(&mut self) {
        self.position = Position::ORIGIN;
    }

    /// Forgets every tile cleaned so far.
    pub fn clear_cleaned_tiles(&mut self) {
        self.cleaned_tiles.clear();
    }

    /// Runs `commands` from `start`, one unit step at a time.
    ///
    /// An invalid start or a blocked step ends the run with an error status;
    /// tiles cleaned before that point are kept. An unrecognized direction is
    /// reported as `Err` when the engine reaches its first step, leaving the
    /// robot where the previous step put it.
    pub fn execute_commands<I: Instruction>(
        &mut self,
        commands: &[I],
        start: Position,
    ) -> Result<ExecutionResult, InvalidDirection> {
        if !self.grid.is_valid_move(start) {
            debug!(%start, "rejected invalid start");
            return Ok(ExecutionResult::halted(
                HaltReason::InvalidStart { position: start },
                self.snapshot(),
            ));
        }

        self.position = start;
        self.visit(start);

        for (index, command) in commands.iter().enumerate() {
            for _ in 0..command.steps() {
                let direction = command.direction().map_err(|error| {
                    debug!(command = index, label = error.label(), "invalid direction");
                    error
                })?;

                let from = self.position;
                let grid = self.grid;
                let Some(to) = movement::next_position(from, direction)
                    .filter(|candidate| grid.is_valid_move(*candidate))
                else {
                    debug!(command = index, %from, %direction, "blocked move");
                    return Ok(ExecutionResult::halted(
                        HaltReason::BlockedMove { from, direction },
                        self.snapshot(),
                    ));
                };

                trace!(%from, %to, "step");
                self.position = to;
                self.visit(to);
            }
        }

        debug!(
            cleaned = self.cleaned_tiles.len(),
            end = %self.position,
            "run completed"
        );
        Ok(ExecutionResult::completed(self.snapshot()))
    }

    fn visit(&mut self, position: Position) {
        if self.policy.is_dirty(position, &self.cleaned_tiles) {
            let _ = self.cleaned_tiles.insert(position);
        }
    }

    fn snapshot(&self) -> Vec<Position> {
        self.cleaned_tiles.iter().copied().collect()
    }
}
