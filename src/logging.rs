//! Logging System
//!
//! Structured logging using the `tracing` crate. The formatter is chosen per
//! invocation: single-line text, multi-line pretty output, or JSON lines.

use crate::error::ReconfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Timestamp layout for text output, e.g. `2021-07-27 12:32:00`.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: text, pretty, json (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable colored output (text and pretty formats only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stdout".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Formatter selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `[date time] LEVEL message` on one line
    Text,
    /// Multi-line human-readable records
    Pretty,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Result<Self, ReconfigError> {
        match value {
            "text" => Ok(LogFormat::Text),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ReconfigError::ConfigError(format!(
                "Invalid log format: {} (must be 'text', 'pretty', or 'json')",
                value
            ))),
        }
    }
}

/// Log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
}

impl LogOutput {
    pub fn parse(value: &str) -> Result<Self, ReconfigError> {
        match value {
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            _ => Err(ReconfigError::ConfigError(format!(
                "Invalid log output: {} (must be 'stdout' or 'stderr')",
                value
            ))),
        }
    }

    fn writer(self) -> BoxMakeWriter {
        match self {
            LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
            LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        }
    }
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. Environment variables (REPLCONF_LOG, REPLCONF_LOG_FORMAT, REPLCONF_LOG_OUTPUT)
/// 2. The given configuration (built from CLI flags)
/// 3. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ReconfigError> {
    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);

    let base_subscriber = Registry::default().with(filter);

    let result = match format {
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                    .with_ansi(use_color)
                    .with_writer(output.writer()),
            )
            .try_init(),
        LogFormat::Pretty => base_subscriber
            .with(
                fmt::layer()
                    .pretty()
                    .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
                    .with_ansi(use_color)
                    .with_writer(output.writer()),
            )
            .try_init(),
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoLocal::rfc_3339())
                    .with_writer(output.writer()),
            )
            .try_init(),
    };

    result.map_err(|e| ReconfigError::ConfigError(format!("Failed to install logger: {}", e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ReconfigError> {
    if let Ok(filter) = EnvFilter::try_from_env("REPLCONF_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);
    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(directive.parse().map_err(|e| {
                ReconfigError::ConfigError(format!("Invalid log directive: {}", e))
            })?);
        }
    }

    Ok(filter)
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<LogFormat, ReconfigError> {
    if let Ok(format) = std::env::var("REPLCONF_LOG_FORMAT") {
        if let Ok(format) = LogFormat::parse(&format) {
            return Ok(format);
        }
    }
    LogFormat::parse(config.map(|c| c.format.as_str()).unwrap_or("text"))
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<LogOutput, ReconfigError> {
    if let Ok(output) = std::env::var("REPLCONF_LOG_OUTPUT") {
        return LogOutput::parse(&output);
    }
    LogOutput::parse(config.map(|c| c.output.as_str()).unwrap_or("stdout"))
}
