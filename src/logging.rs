//! Subscriber setup
//!
//! The normalizers only emit `tracing` events: dispatch decisions at `debug`,
//! absorbed link failures at `trace`, depth truncation at `warn`. Applications
//! that want them rendered call [`init_logging`] once at startup.
//!
//! Environment variables override the configured values:
//! `DAGNORM_LOG` (filter directives), `DAGNORM_LOG_FORMAT`,
//! `DAGNORM_LOG_OUTPUT` and `DAGNORM_LOG_FILE`.

use crate::error::LoggingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const FILTER_ENV: &str = "DAGNORM_LOG";
const FORMAT_ENV: &str = "DAGNORM_LOG_FORMAT";
const OUTPUT_ENV: &str = "DAGNORM_LOG_OUTPUT";
const FILE_ENV: &str = "DAGNORM_LOG_FILE";

/// Event rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(LoggingError::Invalid(format!(
                "Invalid log format: {} (expected text or json)",
                other
            ))),
        }
    }
}

/// Where events are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    #[serde(rename = "stdout")]
    Stdout,
    #[default]
    #[serde(rename = "stderr")]
    Stderr,
    #[serde(rename = "file")]
    File,
    #[serde(rename = "file+stderr")]
    FileAndStderr,
}

impl LogOutput {
    pub fn writes_file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::FileAndStderr)
    }
}

impl FromStr for LogOutput {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            "file" => Ok(LogOutput::File),
            "file+stderr" => Ok(LogOutput::FileAndStderr),
            other => Err(LoggingError::Invalid(format!(
                "Invalid log output: {} (expected stdout, stderr, file or file+stderr)",
                other
            ))),
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogOutput::Stdout => "stdout",
            LogOutput::Stderr => "stderr",
            LogOutput::File => "file",
            LogOutput::FileAndStderr => "file+stderr",
        })
    }
}

/// `[logging]` table of the normalizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// When false, `init_logging` installs a subscriber that drops everything
    #[serde(default = "on")]
    pub enabled: bool,

    /// Base level: trace, debug, info, warn, error or off
    #[serde(default = "info")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file for file outputs; platform state directory when unset
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colors for text written to a terminal stream
    #[serde(default = "on")]
    pub color: bool,

    /// Per-target levels, e.g. `"dagnorm::tree" = "trace"`
    #[serde(default)]
    pub modules: BTreeMap<String, String>,
}

fn on() -> bool {
    true
}

fn info() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: on(),
            level: info(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            color: on(),
            modules: BTreeMap::new(),
        }
    }
}

/// Pick the log file: explicit argument, then `DAGNORM_LOG_FILE`, then the
/// configured path, then `dagnorm.log` in the platform state directory.
/// Empty paths are skipped.
pub fn resolve_log_file_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
) -> Result<PathBuf, LoggingError> {
    let from_env = std::env::var_os(FILE_ENV).map(PathBuf::from);
    let candidate = [explicit.map(Path::to_path_buf), from_env, configured.map(Path::to_path_buf)]
        .into_iter()
        .flatten()
        .find(|p| !p.as_os_str().is_empty());
    match candidate {
        Some(path) => Ok(path),
        None => default_log_file_path(),
    }
}

fn default_log_file_path() -> Result<PathBuf, LoggingError> {
    let dirs = directories::ProjectDirs::from("", "dagnorm", "dagnorm")
        .ok_or_else(|| LoggingError::File("No home directory to place the log file in".to_string()))?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Ok(dir.join("dagnorm.log"))
}

/// Install the global subscriber
///
/// `None` uses [`LoggingConfig::default`]. Fails on invalid levels, formats
/// or outputs, on an unopenable log file, and when a global subscriber is
/// already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), LoggingError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    if !config.enabled {
        return Registry::default()
            .with(LevelFilter::OFF)
            .try_init()
            .map_err(|e| LoggingError::Invalid(e.to_string()));
    }

    let filter = build_filter(config)?;
    let format = env_override::<LogFormat>(FORMAT_ENV)?.unwrap_or(config.format);
    let output = env_override::<LogOutput>(OUTPUT_ENV)?.unwrap_or(config.output);
    let writer = make_writer(output, config.file.as_deref())?;

    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);
    let registry = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Json => registry.with(layer.json()).try_init(),
        LogFormat::Text => registry
            .with(layer.with_ansi(config.color && !output.writes_file()))
            .try_init(),
    };
    installed.map_err(|e| LoggingError::Invalid(e.to_string()))
}

fn env_override<T>(key: &str) -> Result<Option<T>, LoggingError>
where
    T: FromStr<Err = LoggingError>,
{
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value.parse().map(Some),
        _ => Ok(None),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_env(FILTER_ENV) {
        return Ok(filter);
    }

    let level = parse_level(&config.level)?;
    let mut filter = EnvFilter::default().add_directive(level.into());
    for (target, target_level) in &config.modules {
        parse_level(target_level)?;
        let directive: Directive = format!("{}={}", target, target_level)
            .parse()
            .map_err(|e| LoggingError::Invalid(format!("Invalid directive for {}: {}", target, e)))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggingError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" | "off" => level
            .parse()
            .map_err(|_| LoggingError::Invalid(format!("Invalid log level: {}", level))),
        _ => Err(LoggingError::Invalid(format!("Invalid log level: {}", level))),
    }
}

fn open_log_file(configured: Option<&Path>) -> Result<std::fs::File, LoggingError> {
    let path = resolve_log_file_path(None, configured)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LoggingError::File(format!("Cannot create log directory {}: {}", parent.display(), e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| LoggingError::File(format!("Cannot open log file {}: {}", path.display(), e)))
}

fn make_writer(output: LogOutput, file: Option<&Path>) -> Result<BoxMakeWriter, LoggingError> {
    let writer = match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::File => BoxMakeWriter::new(Arc::new(open_log_file(file)?)),
        LogOutput::FileAndStderr => {
            BoxMakeWriter::new(Arc::new(open_log_file(file)?).and(std::io::stderr))
        }
    };
    Ok(writer)
}
