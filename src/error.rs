//! Error types for normalization, configuration, and logging setup.

use thiserror::Error;

/// Fatal normalization errors.
///
/// Only the node's own identity can fail a normalization. Malformed links,
/// unresolvable targets, and payloads without filesystem metadata are absorbed
/// by the normalizers and never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Invalid content identifier: {0}")]
    InvalidIdentifier(String),
}

/// Filesystem metadata decode failure.
///
/// Expected for any DAG-PB payload that is not UnixFS; the link-list
/// normalizer treats it as "no filesystem semantics".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsDecodeError {
    #[error("Payload is not filesystem metadata: {0}")]
    NotFsMetadata(String),

    #[error("Unsupported filesystem entry kind: {0}")]
    UnsupportedKind(String),
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging subscriber setup errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Invalid log configuration: {0}")]
    Invalid(String),

    #[error("Log file error: {0}")]
    File(String),
}
