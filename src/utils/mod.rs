mod config;
mod error;
mod format_int;
mod init;
mod parse_rle;

pub use config::{ConfigError, RunConfig, RunnerConfig, UniverseConfig, ENV_PREFIX};
pub use error::{Error, Result};
pub use format_int::NiceInt;
pub use init::Init;
pub use parse_rle::{parse_rle, RlePattern};
