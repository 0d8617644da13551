use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_EXPECTED_NAME, DEFAULT_FAILURE_STATUS,
    MAX_FAILURE_STATUS, MIN_FAILURE_STATUS,
};

use serde::Deserialize;

/// Settings for the `/exec` command check.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// The only command name `/exec` accepts
    pub expected_name: String,
    /// Status returned when the command name does not match.
    ///
    /// Must be a 5xx code without a registered reason phrase so clients can
    /// tell a rejected command apart from both success and a generic server
    /// failure.
    pub failure_status: u16,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            expected_name: String::from(DEFAULT_EXPECTED_NAME),
            failure_status: DEFAULT_FAILURE_STATUS,
        }
    }
}

impl ExecConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.expected_name.trim().is_empty() {
            return Err(ConfigError::exec("exec.expected_name cannot be empty"));
        }

        if !(MIN_FAILURE_STATUS..=MAX_FAILURE_STATUS).contains(&self.failure_status) {
            return Err(ConfigError::exec(format!(
                "exec.failure_status must be {}-{}, got {}",
                MIN_FAILURE_STATUS, MAX_FAILURE_STATUS, self.failure_status
            )));
        }

        if is_registered_server_error(self.failure_status) {
            return Err(ConfigError::exec(format!(
                "exec.failure_status must not be a registered status code, got {}",
                self.failure_status
            )));
        }

        Ok(())
    }
}

/// IANA-registered 5xx codes (RFC 9110, RFC 6585, RFC 2774, RFC 5842, RFC 8470).
fn is_registered_server_error(status: u16) -> bool {
    matches!(status, 500..=508 | 510 | 511)
}
