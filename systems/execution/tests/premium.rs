use std::collections::{BTreeSet, VecDeque};

use cleaning_robot_core::{Command, Direction, ModelKind, Position, RunStatus};
use cleaning_robot_system_dirtiness::{Config, DirtinessPolicy, ModelPolicy, ProbabilisticPolicy};
use cleaning_robot_system_execution::Robot;
use cleaning_robot_world::Grid;

/// Replays a fixed list of sensor readings and records every query.
#[derive(Debug)]
struct ScriptedSensor {
    readings: VecDeque<bool>,
    queried: Vec<Position>,
}

impl ScriptedSensor {
    fn new(readings: &[bool]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            queried: Vec::new(),
        }
    }
}

impl DirtinessPolicy for ScriptedSensor {
    fn is_dirty(&mut self, position: Position, cleaned: &BTreeSet<Position>) -> bool {
        self.queried.push(position);
        if cleaned.contains(&position) {
            return false;
        }
        self.readings.pop_front().unwrap_or(false)
    }
}

fn open_grid() -> Grid {
    Grid::new(4, 4, []).expect("valid grid")
}

#[test]
fn policy_is_consulted_on_every_arrival_including_start() {
    let grid = open_grid();
    let mut robot = Robot::new(&grid, ScriptedSensor::new(&[true, false, true]));
    let result = robot
        .execute_commands(&[Command::new(Direction::East, 2)], Position::ORIGIN)
        .expect("directions are valid");

    assert_eq!(result.status(), RunStatus::Completed);
    assert_eq!(
        robot.policy().queried,
        vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
    );
    assert_eq!(
        result.cleaned_tiles(),
        &[Position::new(0, 0), Position::new(2, 0)]
    );
}

#[test]
fn revisiting_a_cleaned_tile_never_double_counts() {
    let grid = open_grid();
    let mut robot = Robot::new(&grid, ScriptedSensor::new(&[true, true, true, true]));
    let commands = [
        Command::new(Direction::East, 1),
        Command::new(Direction::West, 1),
        Command::new(Direction::East, 1),
    ];

    let result = robot
        .execute_commands(&commands, Position::ORIGIN)
        .expect("directions are valid");

    assert_eq!(result.cleaned_tiles().len(), 2);
    assert_eq!(
        robot.policy().readings.len(),
        2,
        "revisits must not consume sensor readings"
    );
}

#[test]
fn seeded_premium_runs_are_repeatable() {
    let grid = open_grid();
    let commands = [
        Command::new(Direction::East, 3),
        Command::new(Direction::South, 3),
        Command::new(Direction::West, 3),
        Command::new(Direction::North, 2),
    ];

    let run = |seed| {
        let policy = ModelPolicy::new(Config::new(ModelKind::Premium, Some(seed)));
        let mut robot = Robot::new(&grid, policy);
        robot
            .execute_commands(&commands, Position::ORIGIN)
            .expect("directions are valid")
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn premium_cleans_a_subset_of_visited_tiles() {
    let grid = open_grid();
    let commands = [
        Command::new(Direction::South, 3),
        Command::new(Direction::East, 3),
        Command::new(Direction::North, 3),
        Command::new(Direction::West, 3),
    ];
    let visited: BTreeSet<Position> = (0..4)
        .flat_map(|i| {
            [
                Position::new(0, i),
                Position::new(i, 3),
                Position::new(3, i),
                Position::new(i, 0),
            ]
        })
        .collect();

    for seed in 0..32 {
        let mut robot = Robot::new(&grid, ProbabilisticPolicy::from_seed(seed));
        let result = robot
            .execute_commands(&commands, Position::ORIGIN)
            .expect("directions are valid");

        assert_eq!(result.status(), RunStatus::Completed);
        assert!(result.cleaned_tiles().len() <= visited.len());
        assert!(result
            .cleaned_tiles()
            .iter()
            .all(|tile| visited.contains(tile)));
    }
}

#[test]
fn premium_never_changes_movement_outcome() {
    let grid = Grid::new(3, 1, [Position::new(2, 0)]).expect("valid grid");
    for seed in 0..16 {
        let mut robot = Robot::new(&grid, ProbabilisticPolicy::from_seed(seed));
        let result = robot
            .execute_commands(&[Command::new(Direction::East, 2)], Position::ORIGIN)
            .expect("directions are valid");
        assert_eq!(result.status(), RunStatus::Error);
        assert_eq!(robot.position(), Position::new(1, 0));
    }
}
