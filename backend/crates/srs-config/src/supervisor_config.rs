use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_EXIT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_STARTUP_TIMEOUT_MS, DEFAULT_SUPERVISOR_HOST, MAX_POLL_INTERVAL_MS,
    MIN_POLL_INTERVAL_MS,
};

use std::time::Duration;

use serde::Deserialize;

/// Timing used when launching and tearing down a service process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Host the supervisor connects to
    pub host: String,
    /// Give up on readiness polling after this long
    pub startup_timeout_ms: u64,
    /// Pause between TCP connect attempts
    pub poll_interval_ms: u64,
    /// How long to wait for the process to exit after `/exit`
    pub exit_timeout_ms: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_SUPERVISOR_HOST),
            startup_timeout_ms: DEFAULT_STARTUP_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            exit_timeout_ms: DEFAULT_EXIT_TIMEOUT_MS,
        }
    }
}

impl SupervisorConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::supervisor("supervisor.host cannot be empty"));
        }

        if self.startup_timeout_ms == 0 {
            return Err(ConfigError::supervisor(
                "supervisor.startup_timeout_ms must be greater than 0",
            ));
        }

        if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(ConfigError::supervisor(format!(
                "supervisor.poll_interval_ms must be {}-{}, got {}",
                MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS, self.poll_interval_ms
            )));
        }

        if self.poll_interval_ms >= self.startup_timeout_ms {
            return Err(ConfigError::supervisor(format!(
                "supervisor.poll_interval_ms ({}) must be less than startup_timeout_ms ({})",
                self.poll_interval_ms, self.startup_timeout_ms
            )));
        }

        if self.exit_timeout_ms == 0 {
            return Err(ConfigError::supervisor(
                "supervisor.exit_timeout_ms must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn exit_timeout(&self) -> Duration {
        Duration::from_millis(self.exit_timeout_ms)
    }
}
