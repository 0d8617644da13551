use crate::app_state::AppState;

use srs_core::OK_REPLY;

use axum::extract::State;
use log::{info, warn};

/// GET /exit - release the lifecycle gate
///
/// The host keeps draining in-flight requests after the release, so this
/// response is delivered before the listener closes. Repeated calls answer
/// `ok` as well and leave the gate untouched.
pub async fn exit(State(state): State<AppState>) -> &'static str {
    if state.gate.release() {
        info!("Shutdown requested via /exit");
    } else {
        warn!("/exit called after the lifecycle gate was already released");
    }

    OK_REPLY
}
