pub mod api;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod host;
pub mod lifecycle_gate;
pub mod logger;
pub mod routes;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use api::{ApiError, Result as ApiResult};
pub use app_state::{AppState, ExecPolicy};
pub use error::{Result as ServerResult, ServerError};
pub use host::ServiceHost;
pub use lifecycle_gate::{GateState, LifecycleGate};
pub use routes::build_router;
