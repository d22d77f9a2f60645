//! Source merging for configuration.

pub mod service;

use crate::tree::WalkerConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with built-in defaults (lowest precedence).
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder().set_default(
        "walker.max_depth",
        WalkerConfig::default().max_depth as i64,
    )
}
