//! Wire types shared by the service and its supervisor.

pub mod endpoint;
pub mod models;


pub use endpoint::{Endpoint, HttpMethod, ROUTE_TABLE};
pub use models::command::Command;
pub use models::status::Status;

/// Body returned by `/ping`
pub const PING_REPLY: &str = "hello";

/// Body returned by `/exec` and `/exit` on success
pub const OK_REPLY: &str = "ok";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain";
