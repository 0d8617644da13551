use crate::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    ExecConfig, LoggingConfig, ServerConfig, SupervisorConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub exec: ExecConfig,
    pub supervisor: SupervisorConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for SRS_CONFIG_DIR env var, else use ./.srs/
    /// 2. Load config.toml if it exists, else use defaults
    /// 3. Apply SRS_* environment variable overrides
    ///
    /// The config directory is never created. Does NOT validate - call
    /// validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SRS_CONFIG_DIR env var > ./.srs/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.exec.validate()?;
        self.supervisor.validate()?;

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Override the configured port (positional CLI argument wins over file and env).
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (workers: {}, shutdown grace: {}ms)",
            self.server.host,
            self.server.port,
            match self.server.worker_threads {
                0 => String::from("auto"),
                n => n.to_string(),
            },
            self.server.shutdown_grace_ms
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  exec: expected_name={}, failure_status={}",
            self.exec.expected_name, self.exec.failure_status
        );
        info!(
            "  supervisor: startup={}ms, poll={}ms, exit={}ms",
            self.supervisor.startup_timeout_ms,
            self.supervisor.poll_interval_ms,
            self.supervisor.exit_timeout_ms
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("SRS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("SRS_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "SRS_SERVER_WORKER_THREADS",
            &mut self.server.worker_threads,
        );
        Self::apply_env_parse(
            "SRS_SERVER_SHUTDOWN_GRACE_MS",
            &mut self.server.shutdown_grace_ms,
        );

        // Logging
        Self::apply_env_parse("SRS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("SRS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SRS_LOG_FILE", &mut self.logging.file);

        // Exec
        Self::apply_env_string("SRS_EXEC_EXPECTED_NAME", &mut self.exec.expected_name);
        Self::apply_env_parse("SRS_EXEC_FAILURE_STATUS", &mut self.exec.failure_status);

        // Supervisor
        Self::apply_env_string("SRS_SUPERVISOR_HOST", &mut self.supervisor.host);
        Self::apply_env_parse(
            "SRS_SUPERVISOR_STARTUP_TIMEOUT_MS",
            &mut self.supervisor.startup_timeout_ms,
        );
        Self::apply_env_parse(
            "SRS_SUPERVISOR_POLL_INTERVAL_MS",
            &mut self.supervisor.poll_interval_ms,
        );
        Self::apply_env_parse(
            "SRS_SUPERVISOR_EXIT_TIMEOUT_MS",
            &mut self.supervisor.exit_timeout_ms,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
