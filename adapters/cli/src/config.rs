//! Optional TOML configuration for the command-line adapter.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use cleaning_robot_core::ModelKind;
use serde::Deserialize;

/// Configuration file consulted when `--config` is not supplied.
pub(crate) const DEFAULT_CONFIG_PATH: &str = "cleaning-robot.toml";

const DEFAULT_HISTORY_PATH: &str = "robot_history.jsonl";
const DEFAULT_MAX_TOTAL_STEPS: u64 = 1_000_000;

/// Settings resolved from the configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// JSON-lines file that stores session records.
    pub(crate) history_path: PathBuf,
    /// Model used when `--model` is not supplied.
    pub(crate) default_model: ModelKind,
    /// Premium sensor seed used when `--seed` is not supplied.
    pub(crate) seed: Option<u64>,
    /// Upper bound on the unit steps a single request may ask for.
    pub(crate) max_total_steps: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            default_model: ModelKind::Base,
            seed: None,
            max_total_steps: Some(DEFAULT_MAX_TOTAL_STEPS),
        }
    }
}

impl Settings {
    /// Loads settings from `explicit`, or from the default file when it exists.
    ///
    /// A missing default file yields built-in defaults; a missing explicit file
    /// is an error.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load configuration from {}", path.display()))
    }

    fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let settings = Settings::from_toml_str("").expect("empty config");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn reads_every_field() {
        let settings = Settings::from_toml_str(
            r#"
            history_path = "runs/history.jsonl"
            default_model = "premium"
            seed = 7
            max_total_steps = 50
            "#,
        )
        .expect("valid config");

        assert_eq!(settings.history_path, PathBuf::from("runs/history.jsonl"));
        assert_eq!(settings.default_model, ModelKind::Premium);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.max_total_steps, Some(50));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(Settings::from_toml_str("colour = \"blue\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(Settings::load(Some(Path::new("missing/cleaning-robot.toml"))).is_err());
    }
}
