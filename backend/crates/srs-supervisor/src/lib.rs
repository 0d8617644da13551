//! Launches the service as a child process and drives it over HTTP.

pub mod cli;
pub mod client;
pub mod error;
pub mod logging;
pub mod port;
pub mod process;
pub mod readiness;
pub mod scenario;
pub mod supervisor;

#[cfg(test)]
mod tests;

pub use client::{ExecOutcome, RawReply, ServiceClient};
pub use error::{Result as SupervisorResult, SupervisorError};
pub use port::PortAllocator;
pub use process::{ChildGuard, ChildState, ProcessSpec, spawn};
pub use readiness::{ReadinessPolicy, await_child_reachable, await_reachable};
pub use scenario::{SmokeReport, run_smoke};
pub use supervisor::Supervisor;
