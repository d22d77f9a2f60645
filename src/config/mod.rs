//! Configuration
//!
//! Normalizer settings loaded through the `config` crate. Sources, lowest
//! precedence first: built-in defaults, an optional TOML file, then
//! `DAGNORM__*` environment variables.

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};

/// Top-level normalizer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Structural link discovery settings
    #[serde(default)]
    pub walker: WalkerConfig,

    /// Logging settings, applied by `logging::init_logging`
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl NormalizerConfig {
    /// Validate loaded values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.walker.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "walker.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
