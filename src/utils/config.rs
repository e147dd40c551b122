//! Runner configuration
//!
//! Sources, lowest to highest priority:
//! 1. built-in defaults
//! 2. `<dir>/default.toml`
//! 3. `<dir>/user.toml`
//! 4. environment variables (`LIFE_SECTION__KEY`, e.g. `LIFE_UNIVERSE__WIDTH=128`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Init;

pub const ENV_PREFIX: &str = "LIFE_";

#[derive(Debug, Error)]
#[error("failed to load configuration: {0}")]
pub struct ConfigError(#[from] Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniverseConfig {
    pub width: u32,
    pub height: u32,
    /// Ignored when `rle_file` is set.
    #[serde(default)]
    pub init: Init,
    /// Pattern placed at the top-left corner of the grid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rle_file: Option<PathBuf>,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            init: Init::random(None, 0.5),
            rle_file: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of ticks to simulate.
    pub generations: u64,
    /// Print the grid every `print_every` generations; 0 prints only the final state.
    pub print_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            print_every: 0,
        }
    }
}

impl RunnerConfig {
    /// Layers defaults, `default.toml` and `user.toml` from `config_dir`, then the environment.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        for name in ["default.toml", "user.toml"] {
            let path = config_dir.join(name);
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_toml(s: &str) -> Result<RunnerConfig, ConfigError> {
        RunnerConfig::from_figment(
            Figment::from(Serialized::defaults(RunnerConfig::default())).merge(Toml::string(s)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load_toml("").unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!((config.universe.width, config.universe.height), (64, 64));
    }

    #[test]
    fn test_toml_overrides() {
        let config = load_toml(
            r#"
            [universe]
            width = 32
            init = { mode = "random", seed = 7, fill_rate = 0.25 }

            [run]
            generations = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.universe.width, 32);
        assert_eq!(config.universe.height, 64);
        assert_eq!(config.universe.init, Init::random(Some(7), 0.25));
        assert_eq!(config.run.generations, 10);
        assert_eq!(config.run.print_every, 0);
    }

    #[test]
    fn test_cells_mode() {
        let config = load_toml(
            r#"
            [universe.init]
            mode = "cells"
            alive = [[1, 0], [1, 1], [1, 2]]
            "#,
        )
        .unwrap();
        assert_eq!(config.universe.init, Init::cells([[1, 0], [1, 1], [1, 2]]));
    }

    #[test]
    fn test_bad_type_is_reported() {
        assert!(load_toml("[universe]\nwidth = \"wide\"").is_err());
        assert!(load_toml("[universe.init]\nmode = \"glider\"").is_err());
    }
}
