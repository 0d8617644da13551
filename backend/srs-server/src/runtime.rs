use crate::error::{Result as ServerErrorResult, ServerError};

use std::panic::Location;

use error_location::ErrorLocation;
use tokio::runtime::{Builder, Runtime};

const WORKER_THREAD_NAME: &str = "srs-worker";

/// Build the multi-threaded runtime whose workers serve requests.
///
/// `worker_threads == 0` keeps tokio's default of one worker per core.
#[track_caller]
pub fn build(worker_threads: usize) -> ServerErrorResult<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name(WORKER_THREAD_NAME);

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    builder.build().map_err(|source| ServerError::Runtime {
        source,
        location: ErrorLocation::from(Location::caller()),
    })
}
