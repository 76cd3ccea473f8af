use std::path::PathBuf;
use std::time::Duration;

use dropzone_engine::UploadSettings;
use dropzone_logging::{LevelFilter, LogDestination};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

/// Where log lines go, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogTarget {
    Off,
    File,
    Terminal,
    Both,
}

/// Resolved runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upload: UploadSettings,
    /// How long the CLI waits for an upload to settle. `None` waits indefinitely.
    pub wait: Option<Duration>,
}

impl AppConfig {
    pub fn new(
        endpoint: &str,
        connect_timeout_ms: Option<u64>,
        request_timeout_ms: Option<u64>,
        wait_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            upload: UploadSettings {
                endpoint: validate_endpoint(endpoint)?,
                connect_timeout: connect_timeout_ms.map(Duration::from_millis),
                request_timeout: request_timeout_ms.map(Duration::from_millis),
            },
            wait: wait_secs.map(Duration::from_secs),
        })
    }
}

/// Accepts absolute http(s) URLs only.
pub fn validate_endpoint(endpoint: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

pub fn log_destination(target: LogTarget, file: PathBuf) -> LogDestination {
    match target {
        LogTarget::Off => LogDestination::Off,
        LogTarget::File => LogDestination::File(file),
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::Both => LogDestination::Both(file),
    }
}

pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Warn)
}
