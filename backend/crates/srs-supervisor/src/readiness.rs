//! Wait for a freshly spawned service to accept TCP connections.

use crate::error::{Result as SupervisorResult, SupervisorError};
use crate::process::{ChildGuard, ChildState};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use srs_config::SupervisorConfig;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::{debug, info};

/// How long and how often to poll for reachability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub startup_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::from(&SupervisorConfig::default())
    }
}

impl From<&SupervisorConfig> for ReadinessPolicy {
    fn from(config: &SupervisorConfig) -> Self {
        Self {
            startup_timeout: config.startup_timeout(),
            poll_interval: config.poll_interval(),
        }
    }
}

/// Poll `host:port` until a TCP connect succeeds or the policy's timeout passes.
pub async fn await_reachable(
    host: &str,
    port: u16,
    policy: &ReadinessPolicy,
) -> SupervisorResult<()> {
    poll(host, port, policy, None).await
}

/// Like [`await_reachable`], but fails fast if `child` exits while we poll.
/// Marks the child `Reachable` on success.
pub async fn await_child_reachable(
    child: &mut ChildGuard,
    host: &str,
    port: u16,
    policy: &ReadinessPolicy,
) -> SupervisorResult<()> {
    poll(host, port, policy, Some(&mut *child)).await?;
    child.set_state(ChildState::Reachable);
    Ok(())
}

async fn poll(
    host: &str,
    port: u16,
    policy: &ReadinessPolicy,
    mut child: Option<&mut ChildGuard>,
) -> SupervisorResult<()> {
    let started = Instant::now();
    let deadline = started + policy.startup_timeout;
    let mut attempts: u32 = 0;

    loop {
        if let Some(child) = child.as_deref_mut()
            && let Some(status) = child.try_exit_status()?
        {
            return Err(SupervisorError::ExitedEarly {
                code: status.code(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        attempts += 1;
        let remaining = deadline.saturating_duration_since(Instant::now());
        match tokio::time::timeout(remaining, TcpStream::connect((host, port))).await {
            Ok(Ok(_stream)) => {
                info!(
                    "{host}:{port} reachable after {:?} ({attempts} attempts)",
                    started.elapsed()
                );
                return Ok(());
            }
            Ok(Err(e)) => debug!("Connect to {host}:{port} failed: {e}"),
            Err(_) => debug!("Connect to {host}:{port} timed out"),
        }

        if Instant::now() >= deadline {
            return Err(SupervisorError::Unreachable {
                host: host.to_string(),
                port,
                timeout_ms: policy.startup_timeout.as_millis() as u64,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        tokio::time::sleep(policy.poll_interval).await;
    }
}
