//! One simulation request, from decoded input to response and history summary.

use std::{fs, path::Path, time::Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use cleaning_robot_core::{
    total_steps, InvalidDirection, LabelledCommand, ModelKind, Position, RunStatus,
};
use cleaning_robot_system_dirtiness::{Config, ModelPolicy};
use cleaning_robot_system_execution::Robot;
use cleaning_robot_system_history::RunSummary;
use cleaning_robot_world::Grid;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Message attached to responses of runs that stopped early.
const HALT_MESSAGE: &str = "Collision detected or invalid path";

/// Starting position and ordered commands for one run.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct SimulationRequest {
    #[serde(default = "origin")]
    start_pos: Position,
    commands: Vec<LabelledCommand>,
}

fn origin() -> Position {
    Position::ORIGIN
}

impl SimulationRequest {
    /// Reads a JSON request document from `path`.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read request at {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse request at {}", path.display()))
    }
}

/// Response printed for a finished run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct SimulationResponse {
    final_state: RunStatus,
    cleaned_tiles: Vec<Position>,
    count_cleaned_tiles: usize,
    model_type: ModelKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// Knobs resolved from flags and configuration.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionOptions {
    /// Robot model to simulate.
    pub(crate) model: ModelKind,
    /// Premium sensor seed; entropy when absent.
    pub(crate) seed: Option<u64>,
    /// Upper bound on requested unit steps.
    pub(crate) max_total_steps: Option<u64>,
}

/// Request-level failures that produce no response.
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    /// A command named an unknown direction.
    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirection),
    /// The request asked for more unit steps than allowed.
    #[error("request asks for {requested} steps, the limit is {limit}")]
    TooManySteps {
        /// Steps requested across all commands.
        requested: u64,
        /// Configured limit.
        limit: u64,
    },
}

/// Response and history summary produced by one run.
#[derive(Clone, Debug)]
pub(crate) struct SessionOutcome {
    pub(crate) response: SimulationResponse,
    pub(crate) summary: RunSummary,
}

/// Runs `request` on a fresh robot bound to `grid`.
pub(crate) fn run(
    grid: &Grid,
    request: &SimulationRequest,
    options: SessionOptions,
) -> Result<SessionOutcome, SessionError> {
    let requested = total_steps(&request.commands);
    if let Some(limit) = options.max_total_steps {
        if requested > limit {
            warn!(requested, limit, "rejected oversized request");
            return Err(SessionError::TooManySteps { requested, limit });
        }
    }

    let policy = ModelPolicy::new(Config::new(options.model, options.seed));
    let mut robot = Robot::new(grid, policy);

    let start_time = Utc::now();
    let started = Instant::now();
    let result = robot.execute_commands(&request.commands, request.start_pos)?;
    let duration = started.elapsed();

    let model = robot.policy().model();
    let count_cleaned_tiles = robot.num_cleaned_tiles();
    info!(
        model = %model,
        status = %result.status(),
        cleaned = count_cleaned_tiles,
        "simulation finished"
    );

    let response = SimulationResponse {
        final_state: result.status(),
        message: (result.status() == RunStatus::Error).then_some(HALT_MESSAGE),
        cleaned_tiles: result.into_cleaned_tiles(),
        count_cleaned_tiles,
        model_type: model,
    };
    let summary = RunSummary {
        model,
        start_time,
        final_state: response.final_state,
        num_actions: requested,
        num_cleaned_tiles: count_cleaned_tiles as u64,
        duration,
    };

    Ok(SessionOutcome { response, summary })
}
