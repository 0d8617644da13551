use srs_core::Status;

use axum::Json;

/// GET /query - current server status
pub async fn query() -> Json<Status> {
    Json(Status::current())
}
