//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::NormalizerConfig;
use crate::error::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment.
    pub fn load() -> Result<NormalizerConfig, ConfigError> {
        Self::finish(MergeService::load(None)?)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<NormalizerConfig, ConfigError> {
        Self::finish(MergeService::load(Some(path))?)
    }

    /// Create default configuration.
    pub fn default() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    fn finish(config: NormalizerConfig) -> Result<NormalizerConfig, ConfigError> {
        config.validate()?;
        Ok(config)
    }
}
