//! Launch a service binary, hand out a client to it, and tear it down.

use crate::client::ServiceClient;
use crate::error::{Result as SupervisorResult, SupervisorError};
use crate::port::PortAllocator;
use crate::process::{self, ChildGuard, ChildState, ProcessSpec};
use crate::readiness::{self, ReadinessPolicy};

use srs_config::SupervisorConfig;

use std::panic::Location;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;

use error_location::ErrorLocation;
use tracing::{info, warn};

/// Grace period between SIGTERM and SIGKILL when a child has to be stopped
const TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// A running service process that has answered `/ping`.
#[derive(Debug)]
pub struct Supervisor {
    child: ChildGuard,
    client: ServiceClient,
    host: String,
    port: u16,
    exit_timeout: Duration,
}

impl Supervisor {
    /// Launch `server_bin` on a free port chosen by the OS.
    pub async fn launch(server_bin: &Path, config: &SupervisorConfig) -> SupervisorResult<Self> {
        let port = PortAllocator::find_free()?;
        Self::launch_on(server_bin, port, config).await
    }

    /// Launch `server_bin` on `preferred` if it is free, otherwise on the
    /// first free port in the `scan_span` ports above it.
    pub async fn launch_preferring(
        server_bin: &Path,
        preferred: u16,
        scan_span: u16,
        config: &SupervisorConfig,
    ) -> SupervisorResult<Self> {
        let last = preferred.saturating_add(scan_span);
        let port = PortAllocator::find_available(preferred, (preferred, last))?;
        if port != preferred {
            warn!("Port {preferred} is taken, launching on {port}");
        }
        Self::launch_on(server_bin, port, config).await
    }

    /// Launch `server_bin` on `port`, passed as its positional argument.
    pub async fn launch_on(
        server_bin: &Path,
        port: u16,
        config: &SupervisorConfig,
    ) -> SupervisorResult<Self> {
        let spec = ProcessSpec::new(server_bin)
            .arg(port.to_string())
            .env("SRS_LOG_COLORED", "false");
        Self::launch_with(&spec, port, config).await
    }

    /// Spawn `spec`, wait until `port` accepts connections, then check `/ping`.
    ///
    /// On any failure the child is killed when its guard drops.
    pub async fn launch_with(
        spec: &ProcessSpec,
        port: u16,
        config: &SupervisorConfig,
    ) -> SupervisorResult<Self> {
        config.validate()?;

        let mut child = process::spawn(spec)?;
        let policy = ReadinessPolicy::from(config);
        readiness::await_child_reachable(&mut child, &config.host, port, &policy).await?;

        // No traffic goes out before reachability; ping is the first request
        let client = ServiceClient::for_port(&config.host, port);
        let reply = client.ping().await?;
        if reply != srs_core::PING_REPLY {
            return Err(SupervisorError::ProbeFailed {
                expected: srs_core::PING_REPLY.to_string(),
                actual: reply,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        child.set_state(ChildState::UnderTest);
        info!("Service ready at {}", client.base_url());

        Ok(Self {
            child,
            client,
            host: config.host.clone(),
            port,
            exit_timeout: config.exit_timeout(),
        })
    }

    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn pid(&self) -> Option<u32> {
        self.child.pid()
    }

    pub fn child_state(&self) -> ChildState {
        self.child.state()
    }

    /// Send `/exit` and wait for the process to end on its own.
    ///
    /// A child that does not exit within the exit timeout is killed and
    /// reported as [`SupervisorError::ExitTimeout`].
    pub async fn shutdown(mut self) -> SupervisorResult<ExitStatus> {
        let reply = match self.client.exit().await {
            Ok(reply) => reply,
            Err(e) => {
                self.kill().await;
                return Err(e);
            }
        };

        if reply != srs_core::OK_REPLY {
            self.kill().await;
            return Err(SupervisorError::UnexpectedReply {
                endpoint: "/exit",
                status: 200,
                body: reply,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.wait_for_exit().await
    }

    /// Wait for a process that has already been sent `/exit` to end.
    ///
    /// Use this when `/exit` went out through [`Self::client`] directly.
    pub async fn wait_for_exit(mut self) -> SupervisorResult<ExitStatus> {
        self.child.set_state(ChildState::SignaledExit);

        let status = match self.child.wait_with_timeout(self.exit_timeout).await {
            Ok(status) => status,
            Err(e) => {
                self.kill().await;
                return Err(e);
            }
        };

        if !status.success() {
            return Err(SupervisorError::ExitStatus {
                code: status.code(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!("Service on port {} exited cleanly", self.port);
        Ok(status)
    }

    async fn kill(&mut self) {
        if let Err(e) = self.child.terminate(TERMINATE_GRACE).await {
            warn!("Failed to stop child (pid {:?}): {e}", self.child.pid());
        }
    }
}
