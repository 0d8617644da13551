mod config;
mod error;
mod exec_config;
mod log_level;
mod logging_config;
mod server_config;
mod supervisor_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use exec_config::ExecConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use supervisor_config::SupervisorConfig;

const CONFIG_DIR_ENV: &str = "SRS_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".srs";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 9999;
const DEFAULT_WORKER_THREADS: usize = 0;
const MAX_WORKER_THREADS: usize = 512;
const DEFAULT_SHUTDOWN_GRACE_MS: u64 = 1_000;
const MAX_SHUTDOWN_GRACE_MS: u64 = 60_000;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;

const DEFAULT_EXPECTED_NAME: &str = "test-name";
const DEFAULT_FAILURE_STATUS: u16 = 517;
const MIN_FAILURE_STATUS: u16 = 500;
const MAX_FAILURE_STATUS: u16 = 599;

const DEFAULT_SUPERVISOR_HOST: &str = "127.0.0.1";
const DEFAULT_STARTUP_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_POLL_INTERVAL_MS: u64 = 10;
const DEFAULT_EXIT_TIMEOUT_MS: u64 = 10_000;
const MIN_POLL_INTERVAL_MS: u64 = 1;
const MAX_POLL_INTERVAL_MS: u64 = 1_000;
