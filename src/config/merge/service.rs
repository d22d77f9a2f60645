//! MergeService: layers sources over the defaults and deserializes the result.

use crate::config::sources::{environment, file};
use crate::config::NormalizerConfig;
use config::ConfigError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence, lowest first: defaults, `path` when given, environment.
    pub fn load(path: Option<&Path>) -> Result<NormalizerConfig, ConfigError> {
        let mut builder = builder_with_defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(file::source(path));
        }
        builder
            .add_source(environment::source())
            .build()?
            .try_deserialize()
    }
}
