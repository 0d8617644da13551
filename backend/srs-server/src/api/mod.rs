pub mod error;
pub mod exec;
pub mod exit;
pub mod not_found;
pub mod ping;
pub mod query;

pub use error::{ApiError, Result};
pub use exec::exec;
pub use exit::exit;
pub use not_found::not_found;
pub use ping::ping;
pub use query::query;
