//! Process environment overlay.

use config::Environment;

/// Prefix shared by every configuration variable.
pub const PREFIX: &str = "DAGNORM";

/// Nested keys are joined with a double underscore, so
/// `DAGNORM__WALKER__MAX_DEPTH=64` sets `walker.max_depth`.
pub const SEPARATOR: &str = "__";

/// Environment source with numeric and boolean values parsed.
pub fn source() -> Environment {
    Environment::with_prefix(PREFIX)
        .separator(SEPARATOR)
        .try_parsing(true)
}
