use srs_core::PING_REPLY;

use log::debug;

/// GET /ping - liveness probe
pub async fn ping() -> &'static str {
    debug!("ping");
    PING_REPLY
}
