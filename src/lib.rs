#![warn(clippy::all)]

mod universe;
mod utils;

pub use universe::Universe;
pub use utils::{
    parse_rle, ConfigError, Error, Init, NiceInt, Result, RlePattern, RunConfig, RunnerConfig,
    UniverseConfig, ENV_PREFIX,
};
