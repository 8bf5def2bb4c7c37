#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Dirtiness policies deciding whether a freshly occupied tile gets cleaned.
//!
//! The probabilistic policy is the only source of nondeterminism in the
//! simulator. It owns its random source outright, so seeding a policy pins
//! every sensor reading it will ever produce.

use std::collections::BTreeSet;

use cleaning_robot_core::{ModelKind, Position};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Chance that the premium sensor reports an uncleaned tile as dirty.
pub const DIRT_PROBABILITY: f64 = 0.5;

/// Rule consulted once per tile immediately after the robot arrives on it.
pub trait DirtinessPolicy {
    /// Reports whether `position` should be added to the cleaned set.
    fn is_dirty(&mut self, position: Position, cleaned: &BTreeSet<Position>) -> bool;
}

/// Base model policy: every visited tile counts as cleaned.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPolicy;

impl DirtinessPolicy for StandardPolicy {
    fn is_dirty(&mut self, _position: Position, _cleaned: &BTreeSet<Position>) -> bool {
        true
    }
}

/// Premium model policy backed by a noisy dirt sensor.
///
/// Tiles already in the cleaned set are skipped without consulting the
/// sensor; every other tile is dirty with probability [`DIRT_PROBABILITY`].
#[derive(Clone, Debug)]
pub struct ProbabilisticPolicy<R = ChaCha8Rng> {
    sensor: R,
}

impl ProbabilisticPolicy<ChaCha8Rng> {
    /// Creates a policy whose readings are fully determined by `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::with_source(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a policy seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_source(ChaCha8Rng::from_entropy())
    }
}

impl<R: RngCore> ProbabilisticPolicy<R> {
    /// Creates a policy reading from the provided random source.
    #[must_use]
    pub fn with_source(sensor: R) -> Self {
        Self { sensor }
    }
}

impl<R: RngCore> DirtinessPolicy for ProbabilisticPolicy<R> {
    fn is_dirty(&mut self, position: Position, cleaned: &BTreeSet<Position>) -> bool {
        if cleaned.contains(&position) {
            return false;
        }
        self.sensor.gen_bool(DIRT_PROBABILITY)
    }
}

/// Configuration parameters required to select a model policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    model: ModelKind,
    seed: Option<u64>,
}

impl Config {
    /// Creates a configuration for `model`, optionally pinning the sensor seed.
    #[must_use]
    pub const fn new(model: ModelKind, seed: Option<u64>) -> Self {
        Self { model, seed }
    }

    /// Model the configuration selects.
    #[must_use]
    pub const fn model(&self) -> ModelKind {
        self.model
    }
}

/// Policy chosen at robot construction time from a [`ModelKind`].
#[derive(Clone, Debug)]
pub enum ModelPolicy {
    /// Base model.
    Standard(StandardPolicy),
    /// Premium model.
    Probabilistic(ProbabilisticPolicy),
}

impl ModelPolicy {
    /// Builds the policy described by `config`.
    ///
    /// Without a seed the premium sensor draws from OS entropy.
    #[must_use]
    pub fn new(config: Config) -> Self {
        match config.model() {
            ModelKind::Base => Self::Standard(StandardPolicy),
            ModelKind::Premium => Self::Probabilistic(match config.seed {
                Some(seed) => ProbabilisticPolicy::from_seed(seed),
                None => ProbabilisticPolicy::from_entropy(),
            }),
        }
    }

    /// Model implemented by the policy.
    #[must_use]
    pub const fn model(&self) -> ModelKind {
        match self {
            Self::Standard(_) => ModelKind::Base,
            Self::Probabilistic(_) => ModelKind::Premium,
        }
    }
}

impl DirtinessPolicy for ModelPolicy {
    fn is_dirty(&mut self, position: Position, cleaned: &BTreeSet<Position>) -> bool {
        match self {
            Self::Standard(policy) => policy.is_dirty(position, cleaned),
            Self::Probabilistic(policy) => policy.is_dirty(position, cleaned),
        }
    }
}
