use crate::api::ApiError;

use axum::http::Uri;

/// Fallback for paths outside the route table
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(uri)
}
