use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Config error: {0}")]
    Config(#[from] srs_config::ConfigError),

    #[error("No available port in range {start}-{end} {location}")]
    NoAvailablePort {
        start: u16,
        end: u16,
        location: ErrorLocation,
    },

    #[error("Failed to spawn {program}: {source} {location}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Service did not start: {host}:{port} unreachable after {timeout_ms}ms {location}")]
    Unreachable {
        host: String,
        port: u16,
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Service exited before becoming reachable (exit code {code:?}) {location}")]
    ExitedEarly {
        code: Option<i32>,
        location: ErrorLocation,
    },

    #[error("Probe failed: expected {expected:?}, got {actual:?} {location}")]
    ProbeFailed {
        expected: String,
        actual: String,
        location: ErrorLocation,
    },

    #[error("Unexpected reply from {endpoint}: HTTP {status}: {body} {location}")]
    UnexpectedReply {
        endpoint: &'static str,
        status: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("Scenario {scenario} failed: {message} {location}")]
    ScenarioFailed {
        scenario: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Service did not exit within {timeout_ms}ms {location}")]
    ExitTimeout {
        timeout_ms: u64,
        location: ErrorLocation,
    },

    #[error("Service exited with code {code:?} {location}")]
    ExitStatus {
        code: Option<i32>,
        location: ErrorLocation,
    },

    #[error("IO error: {source} {location}")]
    Io {
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("HTTP error: {source} {location}")]
    Http {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl SupervisorError {
    #[track_caller]
    pub fn scenario<S: Into<String>>(scenario: &'static str, message: S) -> Self {
        Self::ScenarioFailed {
            scenario,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Whether this error is recoverable via retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Unreachable { .. } | Self::Http { .. } | Self::NoAvailablePort { .. }
        )
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Config(_) => {
                "Configuration has invalid settings. \
                   Check config.toml and SRS_* environment variables."
            }
            Self::NoAvailablePort { .. } => {
                "No free port found in the requested range. \
                   Pick another port or let the supervisor choose one."
            }
            Self::Spawn { .. } => {
                "The server binary could not be started. \
                   Check the --server-bin path and its permissions."
            }
            Self::Unreachable { .. } => {
                "The service never accepted connections. \
                   Check its output for bind errors or raise startup_timeout_ms."
            }
            Self::ExitedEarly { .. } => {
                "The service process died during startup. \
                   Its output usually names the cause (often a port already in use)."
            }
            Self::ExitTimeout { .. } => {
                "The service ignored /exit. \
                   It was killed; check that the exit route releases the lifecycle gate."
            }
            _ => "An unexpected error occurred. Please check the logs for details.",
        }
    }

    /// Process exit code, when the error carries one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitedEarly { code, .. } | Self::ExitStatus { code, .. } => *code,
            _ => None,
        }
    }
}

impl From<std::io::Error> for SupervisorError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for SupervisorError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
