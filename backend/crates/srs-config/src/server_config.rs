use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SHUTDOWN_GRACE_MS,
    DEFAULT_WORKER_THREADS, MAX_SHUTDOWN_GRACE_MS, MAX_WORKER_THREADS,
};

use std::net::IpAddr;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Port to bind; 0 lets the OS assign one
    pub port: u16,
    /// Request worker threads (0 = one per core)
    pub worker_threads: usize,
    /// How long open connections may drain after shutdown starts
    pub shutdown_grace_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            worker_threads: DEFAULT_WORKER_THREADS,
            shutdown_grace_ms: DEFAULT_SHUTDOWN_GRACE_MS,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::server(format!(
                "server.host must be an IP address, got '{}'",
                self.host
            )));
        }

        if self.worker_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::server(format!(
                "server.worker_threads must be 0-{}, got {}",
                MAX_WORKER_THREADS, self.worker_threads
            )));
        }

        if self.shutdown_grace_ms > MAX_SHUTDOWN_GRACE_MS {
            return Err(ConfigError::server(format!(
                "server.shutdown_grace_ms must be 0-{}, got {}",
                MAX_SHUTDOWN_GRACE_MS, self.shutdown_grace_ms
            )));
        }

        Ok(())
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}
