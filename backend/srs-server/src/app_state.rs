use crate::api::ApiError;
use crate::error::{Result as ServerErrorResult, ServerError};
use crate::lifecycle_gate::LifecycleGate;

use srs_core::Command;

use std::panic::Location;
use std::sync::Arc;

use axum::http::StatusCode;
use error_location::ErrorLocation;

/// Rule applied to every `/exec` request.
#[derive(Debug, Clone)]
pub struct ExecPolicy {
    pub expected_name: Arc<str>,
    pub failure_status: StatusCode,
}

impl ExecPolicy {
    #[track_caller]
    pub fn from_config(config: &srs_config::ExecConfig) -> ServerErrorResult<Self> {
        let failure_status = StatusCode::from_u16(config.failure_status).map_err(|_| {
            ServerError::InvalidStatus {
                status: config.failure_status,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(Self {
            expected_name: Arc::from(config.expected_name.as_str()),
            failure_status,
        })
    }

    /// Reject any command whose name is not the expected one.
    #[track_caller]
    pub fn check(&self, command: &Command) -> Result<(), ApiError> {
        if command.name == *self.expected_name {
            return Ok(());
        }

        Err(ApiError::CommandRejected {
            expected: self.expected_name.to_string(),
            actual: command.name.clone(),
            status: self.failure_status,
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Default for ExecPolicy {
    fn default() -> Self {
        let config = srs_config::ExecConfig::default();
        Self {
            expected_name: Arc::from(config.expected_name.as_str()),
            failure_status: StatusCode::from_u16(config.failure_status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// State shared by every handler
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub exec: ExecPolicy,
    pub gate: LifecycleGate,
}

impl AppState {
    pub fn new(exec: ExecPolicy) -> Self {
        Self {
            exec,
            gate: LifecycleGate::new(),
        }
    }
}
