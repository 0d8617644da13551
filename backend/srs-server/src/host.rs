//! Network side of the service: bind, serve, wait for the gate, stop.

use crate::error::{Result as ServerErrorResult, ServerError};
use crate::lifecycle_gate::LifecycleGate;

use std::net::SocketAddr;
use std::panic::Location;
use std::time::Duration;

use axum::Router;
use error_location::ErrorLocation;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running HTTP listener whose lifetime is bounded by a [`LifecycleGate`].
pub struct ServiceHost {
    local_addr: SocketAddr,
    gate: LifecycleGate,
    stop_tx: Option<oneshot::Sender<()>>,
    serve_task: JoinHandle<std::io::Result<()>>,
}

impl ServiceHost {
    /// Bind `bind_addr` and start serving `router` on a background task.
    ///
    /// Returns once the listener is accepting connections. Binding is all or
    /// nothing: if the address is taken this fails and nothing is served.
    pub async fn start(
        bind_addr: &str,
        router: Router,
        gate: LifecycleGate,
    ) -> ServerErrorResult<Self> {
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.to_string(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        // Actual address matters when port 0 was requested
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: bind_addr.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
        info!("Server listening on {}", local_addr);

        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let serve_task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = stop_rx.await;
                })
                .await
        });

        Ok(Self {
            local_addr,
            gate,
            stop_tx: Some(stop_tx),
            serve_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn gate(&self) -> &LifecycleGate {
        &self.gate
    }

    /// Block until the lifecycle gate is released.
    pub async fn await_shutdown(&self) {
        self.gate.wait().await;
        info!("Lifecycle gate released");
    }

    /// Stop accepting connections and join the serve task.
    ///
    /// In-flight requests get up to `grace` to finish. Connections still open
    /// after that (a client stalled mid-request, say) are abandoned so the
    /// process can exit.
    pub async fn stop(mut self, grace: Duration) -> ServerErrorResult<()> {
        if let Some(stop_tx) = self.stop_tx.take()
            && stop_tx.send(()).is_err()
        {
            warn!("Serve task already finished before stop");
        }

        let joined = match tokio::time::timeout(grace, &mut self.serve_task).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(
                    "Connections on {} still open after {:?}, abandoning them",
                    self.local_addr, grace
                );
                self.serve_task.abort();
                return Ok(());
            }
        };

        match joined {
            Ok(Ok(())) => {
                info!("Listener on {} closed", self.local_addr);
                Ok(())
            }
            Ok(Err(source)) => Err(ServerError::Serve {
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(e) => Err(ServerError::Join {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
